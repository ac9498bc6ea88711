use crate::catalog::SortKey;
use crate::tea::message::{CatalogMessage, Message, SystemMessage, UIMessage};
use crate::tea::model::{Model, ViewMode};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Maps key presses to messages depending on what currently has focus
#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Translate a key event. `None` means the key does nothing here.
    pub fn handle_key_event(&self, key: &KeyEvent, model: &Model) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(SystemMessage::Quit.into());
        }

        // A pending notice swallows every key until it is acknowledged
        if model.notice.is_some() {
            return matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' '))
                .then(|| UIMessage::AcknowledgeNotice.into());
        }

        match model.mode {
            ViewMode::Search => Self::handle_search_key(key, model),
            ViewMode::Form => Self::handle_form_key(key),
            ViewMode::Detail => Self::handle_detail_key(key),
            ViewMode::Help => Self::handle_help_key(key),
            ViewMode::Browse => Self::handle_browse_key(key),
        }
    }

    fn handle_search_key(key: &KeyEvent, model: &Model) -> Option<Message> {
        let message: Message = match key.code {
            KeyCode::Enter | KeyCode::Esc => UIMessage::EndSearch.into(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                UIMessage::SearchClear.into()
            }
            KeyCode::Backspace => {
                let mut query = model.search_input.clone();
                query.pop();
                UIMessage::SearchChanged(query).into()
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut query = model.search_input.clone();
                query.push(c);
                UIMessage::SearchChanged(query).into()
            }
            _ => return None,
        };
        Some(message)
    }

    fn handle_form_key(key: &KeyEvent) -> Option<Message> {
        let message = match key.code {
            KeyCode::Esc => UIMessage::FormCancel,
            KeyCode::Enter => UIMessage::FormSubmit,
            KeyCode::Tab | KeyCode::Down => UIMessage::FormNextField,
            KeyCode::BackTab | KeyCode::Up => UIMessage::FormPreviousField,
            KeyCode::Left => UIMessage::FormCycleCategory(false),
            KeyCode::Right => UIMessage::FormCycleCategory(true),
            KeyCode::Backspace => UIMessage::FormBackspace,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                UIMessage::FormInput(c)
            }
            _ => return None,
        };
        Some(message.into())
    }

    fn handle_detail_key(key: &KeyEvent) -> Option<Message> {
        let message: Message = match key.code {
            KeyCode::Esc | KeyCode::Enter => UIMessage::CloseOverlay.into(),
            KeyCode::Char('e') => CatalogMessage::StartEdit.into(),
            KeyCode::Char('q') => SystemMessage::Quit.into(),
            KeyCode::Char('d') => UIMessage::DismissBanner.into(),
            _ => return None,
        };
        Some(message)
    }

    fn handle_help_key(key: &KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') => Some(UIMessage::ToggleHelp.into()),
            KeyCode::Char('q') => Some(SystemMessage::Quit.into()),
            _ => None,
        }
    }

    fn handle_browse_key(key: &KeyEvent) -> Option<Message> {
        let message: Message = match key.code {
            KeyCode::Char('q') => SystemMessage::Quit.into(),
            KeyCode::Char('?') => UIMessage::ToggleHelp.into(),
            KeyCode::Char('/') => UIMessage::BeginSearch.into(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                UIMessage::SearchClear.into()
            }
            KeyCode::Char('t') => CatalogMessage::SortBy(SortKey::Title).into(),
            KeyCode::Char('p') => CatalogMessage::SortBy(SortKey::Price).into(),
            KeyCode::Char('+') | KeyCode::Char('=') => CatalogMessage::NextPageSize.into(),
            KeyCode::Char('-') => CatalogMessage::PreviousPageSize.into(),
            KeyCode::Left | KeyCode::Char('h') => CatalogMessage::PreviousPage.into(),
            KeyCode::Right | KeyCode::Char('l') => CatalogMessage::NextPage.into(),
            KeyCode::Home | KeyCode::Char('g') => CatalogMessage::FirstPage.into(),
            KeyCode::End | KeyCode::Char('G') => CatalogMessage::LastPage.into(),
            KeyCode::Char(c @ '1'..='9') => {
                CatalogMessage::GoToPage(c.to_digit(10).unwrap_or(1) as usize).into()
            }
            KeyCode::Down | KeyCode::Char('j') => UIMessage::SelectNext.into(),
            KeyCode::Up | KeyCode::Char('k') => UIMessage::SelectPrevious.into(),
            KeyCode::Enter => UIMessage::OpenDetail.into(),
            KeyCode::Char('e') => CatalogMessage::StartEdit.into(),
            KeyCode::Char('n') => CatalogMessage::StartCreate.into(),
            KeyCode::Char('x') => CatalogMessage::Export.into(),
            KeyCode::Char('r') => CatalogMessage::Refresh.into(),
            KeyCode::Char('a') => SystemMessage::ToggleAutoRefresh.into(),
            KeyCode::Char('d') => UIMessage::DismissBanner.into(),
            KeyCode::Esc => UIMessage::CloseOverlay.into(),
            _ => return None,
        };
        Some(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn model_in(mode: ViewMode) -> Model {
        let mut model = Model::default();
        model.mode = mode;
        model
    }

    #[test]
    fn test_browse_bindings() {
        let handler = EventHandler::new();
        let model = model_in(ViewMode::Browse);

        assert!(matches!(
            handler.handle_key_event(&key(KeyCode::Char('p')), &model),
            Some(Message::Catalog(CatalogMessage::SortBy(SortKey::Price)))
        ));
        assert!(matches!(
            handler.handle_key_event(&key(KeyCode::Char('3')), &model),
            Some(Message::Catalog(CatalogMessage::GoToPage(3)))
        ));
        assert!(matches!(
            handler.handle_key_event(&key(KeyCode::Char('l')), &model),
            Some(Message::Catalog(CatalogMessage::NextPage))
        ));
        assert!(matches!(
            handler.handle_key_event(&key(KeyCode::Char('q')), &model),
            Some(Message::System(SystemMessage::Quit))
        ));
        assert!(handler.handle_key_event(&key(KeyCode::Char('z')), &model).is_none());
    }

    #[test]
    fn test_search_typing_builds_query() {
        let handler = EventHandler::new();
        let mut model = model_in(ViewMode::Search);
        model.search_input = "cha".to_string();

        match handler.handle_key_event(&key(KeyCode::Char('q')), &model) {
            Some(Message::UI(UIMessage::SearchChanged(query))) => assert_eq!(query, "chaq"),
            other => panic!("unexpected: {:?}", other),
        }
        match handler.handle_key_event(&key(KeyCode::Backspace), &model) {
            Some(Message::UI(UIMessage::SearchChanged(query))) => assert_eq!(query, "ch"),
            other => panic!("unexpected: {:?}", other),
        }
        assert!(matches!(
            handler.handle_key_event(&ctrl('u'), &model),
            Some(Message::UI(UIMessage::SearchClear))
        ));
        assert!(matches!(
            handler.handle_key_event(&key(KeyCode::Esc), &model),
            Some(Message::UI(UIMessage::EndSearch))
        ));
    }

    #[test]
    fn test_form_keys_are_text_input() {
        let handler = EventHandler::new();
        let model = model_in(ViewMode::Form);
        assert!(matches!(
            handler.handle_key_event(&key(KeyCode::Char('q')), &model),
            Some(Message::UI(UIMessage::FormInput('q')))
        ));
        assert!(matches!(
            handler.handle_key_event(&key(KeyCode::Right), &model),
            Some(Message::UI(UIMessage::FormCycleCategory(true)))
        ));
        assert!(matches!(
            handler.handle_key_event(&key(KeyCode::Enter), &model),
            Some(Message::UI(UIMessage::FormSubmit))
        ));
    }

    #[test]
    fn test_notice_blocks_other_keys() {
        let handler = EventHandler::new();
        let mut model = model_in(ViewMode::Browse);
        model.notice = Some("No data to export".to_string());
        assert!(handler.handle_key_event(&key(KeyCode::Char('x')), &model).is_none());
        assert!(matches!(
            handler.handle_key_event(&key(KeyCode::Enter), &model),
            Some(Message::UI(UIMessage::AcknowledgeNotice))
        ));
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let handler = EventHandler::new();
        let model = model_in(ViewMode::Form);
        assert!(matches!(
            handler.handle_key_event(&ctrl('c'), &model),
            Some(Message::System(SystemMessage::Quit))
        ));
    }

    #[test]
    fn test_detail_edit() {
        let handler = EventHandler::new();
        let model = model_in(ViewMode::Detail);
        assert!(matches!(
            handler.handle_key_event(&key(KeyCode::Char('e')), &model),
            Some(Message::Catalog(CatalogMessage::StartEdit))
        ));
    }
}
