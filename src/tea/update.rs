//! Update function for TEA pattern
//!
//! Central update function that handles all messages and updates the model
//! accordingly. Every state change of the admin panel happens here.

use crate::api::{CreateProductRequest, UpdateProductRequest};
use crate::catalog::{FetchOutcome, FetchTicket, Product};
use crate::tea::command::{FileSystemCommand, NetworkCommand};
use crate::tea::message::{CatalogMessage, SystemMessage, UIMessage};
use crate::tea::model::ViewMode;
use crate::tea::{Command, Message, Model, UpdateResult};
use crate::ui::product_form::{FormSubmission, ProductForm};
use std::time::Instant;

/// Main update function that processes messages and returns updated model with commands
pub fn update(model: Model, message: Message) -> UpdateResult<Model> {
    match message {
        Message::System(msg) => update_system(model, msg),
        Message::UI(msg) => update_ui(model, msg),
        Message::Catalog(msg) => update_catalog(model, msg),
    }
}

/// Issue a fetch with a fresh ticket
fn fetch(model: &mut Model) -> Command {
    let ticket = model.catalog.begin_fetch();
    model.refresh.last_fetch = Some(Instant::now());
    model.refresh.in_flight += 1;
    tracing::debug!("Issuing fetch {}", ticket);
    Command::network(NetworkCommand::FetchProducts { ticket })
}

/// Handle system messages
fn update_system(mut model: Model, message: SystemMessage) -> UpdateResult<Model> {
    match message {
        SystemMessage::Quit => {
            model.app_state.should_quit = true;
            model.refresh.active = false;
            UpdateResult::just_model(model)
        }

        SystemMessage::Resize(width, height) => {
            model.app_state.terminal_size = (width, height);
            UpdateResult::just_model(model)
        }

        SystemMessage::Tick => {
            let now = Instant::now();
            model.app_state.last_tick = now;
            model.toasts.prune(now);

            if model.refresh.is_due(now) {
                let command = fetch(&mut model);
                return UpdateResult::with_command(model, command);
            }
            UpdateResult::just_model(model)
        }

        SystemMessage::StartAutoRefresh => {
            tracing::info!(
                "Auto-refresh every {}s",
                model.refresh.interval.as_secs()
            );
            model.refresh.active = true;
            let command = fetch(&mut model);
            UpdateResult::with_command(model, command)
        }

        SystemMessage::StopAutoRefresh => {
            model.refresh.active = false;
            UpdateResult::just_model(model)
        }

        SystemMessage::ToggleAutoRefresh => {
            model.refresh.paused = !model.refresh.paused;
            if model.refresh.paused {
                model.toasts.info("Auto-refresh paused");
            } else {
                model.toasts.info("Auto-refresh resumed");
            }
            UpdateResult::just_model(model)
        }
    }
}

/// Handle UI messages
fn update_ui(mut model: Model, message: UIMessage) -> UpdateResult<Model> {
    match message {
        UIMessage::ToggleHelp => {
            model.mode = if model.mode == ViewMode::Help {
                model.base_mode()
            } else {
                ViewMode::Help
            };
        }

        UIMessage::SelectNext => {
            model.selected_row += 1;
            model.clamp_selection();
        }

        UIMessage::SelectPrevious => {
            model.selected_row = model.selected_row.saturating_sub(1);
        }

        UIMessage::OpenDetail => {
            if let Some(id) = model.selected_product().map(|p| p.id) {
                model.detail = Some(id);
                model.mode = ViewMode::Detail;
            }
        }

        UIMessage::CloseOverlay => match model.mode {
            ViewMode::Form => return update_ui(model, UIMessage::FormCancel),
            ViewMode::Help => model.mode = model.base_mode(),
            _ => {
                model.detail = None;
                model.mode = ViewMode::Browse;
            }
        },

        UIMessage::DismissBanner => {
            model.banner = None;
        }

        UIMessage::AcknowledgeNotice => {
            model.notice = None;
        }

        UIMessage::BeginSearch => {
            model.mode = ViewMode::Search;
        }

        UIMessage::EndSearch => {
            model.mode = ViewMode::Browse;
        }

        UIMessage::SearchChanged(query) => {
            if model.catalog.set_query(&query) {
                model.selected_row = 0;
            }
            model.search_input = query;
        }

        UIMessage::SearchClear => {
            model.search_input.clear();
            if model.catalog.set_query("") {
                model.selected_row = 0;
            }
        }

        UIMessage::FormInput(c) => {
            if let Some(form) = model.form.as_mut() {
                form.insert_char(c);
            }
        }

        UIMessage::FormBackspace => {
            if let Some(form) = model.form.as_mut() {
                form.backspace();
            }
        }

        UIMessage::FormNextField => {
            if let Some(form) = model.form.as_mut() {
                form.focus_next();
            }
        }

        UIMessage::FormPreviousField => {
            if let Some(form) = model.form.as_mut() {
                form.focus_previous();
            }
        }

        UIMessage::FormCycleCategory(forward) => {
            if let Some(form) = model.form.as_mut() {
                form.cycle_category(forward);
            }
        }

        UIMessage::FormSubmit => return submit_form(model),

        UIMessage::FormCancel => {
            model.form = None;
            model.mode = model.base_mode();
        }
    }

    UpdateResult::just_model(model)
}

/// Validate the open form and turn it into an API call
fn submit_form(mut model: Model) -> UpdateResult<Model> {
    let Some(mut form) = model.form.take() else {
        return UpdateResult::just_model(model);
    };
    if form.submitting {
        model.form = Some(form);
        return UpdateResult::just_model(model);
    }

    let command = match form.submit() {
        Ok(FormSubmission::Create(draft)) => {
            let request = CreateProductRequest::from(&draft);
            Command::network(NetworkCommand::CreateProduct { draft, request })
        }
        Ok(FormSubmission::Update { id, changes }) => match model.catalog.product(id) {
            Some(product) => {
                let request = UpdateProductRequest::new(&changes, product);
                Command::network(NetworkCommand::UpdateProduct { id, request })
            }
            None => {
                model.banner = Some(format!("Product #{} is no longer in the catalog", id));
                model.mode = ViewMode::Browse;
                model.detail = None;
                return UpdateResult::just_model(model);
            }
        },
        // The error stays on the form; nothing goes out
        Err(_) => {
            model.form = Some(form);
            return UpdateResult::just_model(model);
        }
    };

    form.submitting = true;
    model.form = Some(form);
    UpdateResult::with_command(model, command)
}

/// Handle catalog messages
fn update_catalog(mut model: Model, message: CatalogMessage) -> UpdateResult<Model> {
    match message {
        CatalogMessage::Refresh => {
            let command = fetch(&mut model);
            return UpdateResult::with_command(model, command);
        }

        CatalogMessage::ProductsLoaded { ticket, products } => {
            model.refresh.in_flight = model.refresh.in_flight.saturating_sub(1);
            apply_fetch(&mut model, ticket, products);
        }

        CatalogMessage::LoadFailed { ticket, error } => {
            model.refresh.in_flight = model.refresh.in_flight.saturating_sub(1);
            model.refresh.last_failed = true;
            tracing::warn!("Fetch {} failed, keeping current products", ticket);
            model.banner = Some(format!("Error fetching products: {}", error));
        }

        CatalogMessage::SortBy(key) => {
            model.catalog.toggle_sort(key);
            model.selected_row = 0;
        }

        CatalogMessage::NextPageSize => {
            let current = model.catalog.state().page_size;
            if let Some(size) = model.page_size_options.iter().find(|s| **s > current) {
                model.catalog.set_page_size(*size);
                model.selected_row = 0;
            }
        }

        CatalogMessage::PreviousPageSize => {
            let current = model.catalog.state().page_size;
            if let Some(size) = model.page_size_options.iter().rev().find(|s| **s < current) {
                model.catalog.set_page_size(*size);
                model.selected_row = 0;
            }
        }

        CatalogMessage::GoToPage(page) => {
            model.catalog.go_to_page(page);
            model.selected_row = 0;
        }

        CatalogMessage::NextPage => {
            model.catalog.next_page();
            model.selected_row = 0;
        }

        CatalogMessage::PreviousPage => {
            model.catalog.previous_page();
            model.selected_row = 0;
        }

        CatalogMessage::FirstPage => {
            model.catalog.go_to_page(1);
            model.selected_row = 0;
        }

        CatalogMessage::LastPage => {
            model.catalog.last_page();
            model.selected_row = 0;
        }

        CatalogMessage::StartEdit => {
            let form = match model.mode {
                ViewMode::Detail => model.detail_product(),
                _ => model.selected_product(),
            }
            .map(ProductForm::edit);
            if form.is_some() {
                model.form = form;
                model.mode = ViewMode::Form;
            }
        }

        CatalogMessage::StartCreate => {
            model.detail = None;
            model.form = Some(ProductForm::create());
            model.mode = ViewMode::Form;
        }

        CatalogMessage::ProductUpdated(product) => {
            let id = product.id;
            if model.catalog.apply_updated(product).is_none() {
                tracing::warn!("Updated product {} is not in the current set", id);
            }
            model.form = None;
            model.mode = model.base_mode();
            model.clamp_selection();
            model.toasts.success("Product updated successfully");
        }

        CatalogMessage::UpdateFailed(error) => {
            if let Some(form) = model.form.as_mut() {
                form.submitting = false;
            }
            model.banner = Some(format!("Error updating product: {}", error));
        }

        CatalogMessage::ProductCreated { product, draft } => {
            let product = draft.complete(product);
            tracing::info!("Created product {} '{}'", product.id, product.title);
            model.catalog.apply_created(product);
            model.form = None;
            model.mode = ViewMode::Browse;
            model.clamp_selection();
            model.toasts.success("Product created successfully");
        }

        CatalogMessage::CreateFailed(error) => {
            if let Some(form) = model.form.as_mut() {
                form.submitting = false;
            }
            model.banner = Some(format!("Error creating product: {}", error));
        }

        CatalogMessage::Export => {
            let products = model.catalog.displayed_products();
            if products.is_empty() {
                model.notice = Some("No data to export".to_string());
                return UpdateResult::just_model(model);
            }
            let command = Command::filesystem(FileSystemCommand::ExportCsv {
                products,
                directory: model.export_dir.clone(),
            });
            return UpdateResult::with_command(model, command);
        }

        CatalogMessage::Exported { path, count } => {
            model
                .toasts
                .success(format!("Exported {} products to {}", count, path.display()));
        }

        CatalogMessage::ExportFailed(error) => {
            model.banner = Some(format!("Error exporting products: {}", error));
        }
    }

    UpdateResult::just_model(model)
}

fn apply_fetch(model: &mut Model, ticket: FetchTicket, products: Vec<Product>) {
    match model.catalog.apply_fetch(ticket, products) {
        FetchOutcome::Applied { replayed } => {
            if replayed > 0 {
                tracing::debug!("Replayed {} confirmed changes over fetch {}", replayed, ticket);
            }
            model.refresh.last_updated = Some(chrono::Local::now());
            if model.refresh.last_failed {
                model.refresh.last_failed = false;
                model.banner = None;
                model.toasts.success("Products refreshed");
            }
            model.clamp_selection();
        }
        FetchOutcome::Stale => {
            tracing::debug!("Dropping stale fetch {}", ticket);
        }
    }
}
