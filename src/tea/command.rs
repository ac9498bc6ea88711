//! Command system for TEA pattern
//!
//! Commands describe side effects requested by `update`. The executor runs
//! them on spawned tokio tasks and reports results back as messages, so the
//! UI loop never waits on the network or the disk.

use crate::api::{CatalogClient, CreateProductRequest, UpdateProductRequest};
use crate::catalog::{write_export, FetchTicket, Product, ProductDraft, ProductId};
use crate::tea::message::CatalogMessage;
use crate::tea::Message;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Command that can be executed to perform side effects
#[derive(Debug)]
pub enum Command {
    /// Catalog API calls
    Network(NetworkCommand),

    /// File system operations
    FileSystem(FileSystemCommand),
}

/// Network operation commands
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// `GET /products`, answered with the same ticket
    FetchProducts { ticket: FetchTicket },

    /// `PUT /products/{id}`
    UpdateProduct {
        id: ProductId,
        request: UpdateProductRequest,
    },

    /// `POST /products`; the draft fills in what the response omits
    CreateProduct {
        draft: ProductDraft,
        request: CreateProductRequest,
    },
}

/// File system operation commands
#[derive(Debug, Clone, PartialEq)]
pub enum FileSystemCommand {
    /// Write the given products as CSV into `directory`
    ExportCsv {
        products: Vec<Product>,
        directory: PathBuf,
    },
}

/// Command executor that processes commands asynchronously
pub struct CommandExecutor {
    message_sender: mpsc::UnboundedSender<Message>,
    client: Arc<dyn CatalogClient>,
}

impl CommandExecutor {
    /// Create a new command executor
    pub fn new(message_sender: mpsc::UnboundedSender<Message>, client: Arc<dyn CatalogClient>) -> Self {
        Self {
            message_sender,
            client,
        }
    }

    /// Execute a command. Must be called from within a tokio runtime.
    pub fn execute(&self, command: Command) {
        match command {
            Command::Network(net_command) => self.execute_network_command(net_command),
            Command::FileSystem(fs_command) => self.execute_filesystem_command(fs_command),
        }
    }

    fn execute_network_command(&self, command: NetworkCommand) {
        let client = Arc::clone(&self.client);
        let sender = self.message_sender.clone();

        tokio::spawn(async move {
            let message = match command {
                NetworkCommand::FetchProducts { ticket } => {
                    tracing::debug!("Fetching products (ticket {})", ticket);
                    match client.fetch_products().await {
                        Ok(products) => CatalogMessage::ProductsLoaded { ticket, products },
                        Err(error) => {
                            tracing::warn!("Fetch {} failed: {}", ticket, error);
                            CatalogMessage::LoadFailed { ticket, error }
                        }
                    }
                }
                NetworkCommand::UpdateProduct { id, request } => {
                    match client.update_product(id, &request).await {
                        Ok(product) => CatalogMessage::ProductUpdated(product),
                        Err(error) => {
                            tracing::warn!("Update of product {} failed: {}", id, error);
                            CatalogMessage::UpdateFailed(error)
                        }
                    }
                }
                NetworkCommand::CreateProduct { draft, request } => {
                    match client.create_product(&request).await {
                        Ok(product) => CatalogMessage::ProductCreated { product, draft },
                        Err(error) => {
                            tracing::warn!("Create failed: {}", error);
                            CatalogMessage::CreateFailed(error)
                        }
                    }
                }
            };

            if let Err(e) = sender.send(message.into()) {
                tracing::error!("Failed to send network result: {}", e);
            }
        });
    }

    fn execute_filesystem_command(&self, command: FileSystemCommand) {
        let sender = self.message_sender.clone();

        match command {
            FileSystemCommand::ExportCsv {
                products,
                directory,
            } => {
                tokio::task::spawn_blocking(move || {
                    let now = chrono::Local::now().naive_local();
                    let message = match write_export(&products, &directory, now) {
                        Ok(path) => CatalogMessage::Exported {
                            path,
                            count: products.len(),
                        },
                        Err(error) => {
                            tracing::error!("Export failed: {}", error);
                            CatalogMessage::ExportFailed(error.to_string())
                        }
                    };

                    if let Err(e) = sender.send(message.into()) {
                        tracing::error!("Failed to send export result: {}", e);
                    }
                });
            }
        }
    }
}

/// Helper functions for creating common commands
impl Command {
    /// Create a network command
    pub fn network(command: NetworkCommand) -> Self {
        Command::Network(command)
    }

    /// Create a filesystem command
    pub fn filesystem(command: FileSystemCommand) -> Self {
        Command::FileSystem(command)
    }
}
