//! Create and edit forms for products
//!
//! The form keeps raw text for every field and only validates on submit,
//! so a half-typed price never blocks editing.

use crate::catalog::{
    CategoryChoice, FormField, Product, ProductChanges, ProductDraft, ProductId, ValidationError,
};
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Which operation the form submits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Create,
    Edit(ProductId),
}

/// Validated form contents, ready to become an API request
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmission {
    Create(ProductDraft),
    Update { id: ProductId, changes: ProductChanges },
}

/// Editable form state
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub kind: FormKind,
    pub title: String,
    pub price: String,
    pub description: String,
    pub category: Option<CategoryChoice>,
    pub focus: FormField,
    pub error: Option<ValidationError>,
    /// A request is in flight; further submits are ignored
    pub submitting: bool,
}

impl ProductForm {
    /// Empty create form with no category chosen
    pub fn create() -> Self {
        Self {
            kind: FormKind::Create,
            title: String::new(),
            price: String::new(),
            description: String::new(),
            category: None,
            focus: FormField::Title,
            error: None,
            submitting: false,
        }
    }

    /// Edit form prefilled from `product`
    pub fn edit(product: &Product) -> Self {
        Self {
            kind: FormKind::Edit(product.id),
            title: product.title.clone(),
            price: product.price.to_string(),
            description: product.description.clone().unwrap_or_default(),
            category: product
                .category
                .as_ref()
                .and_then(|c| CategoryChoice::from_id(c.id)),
            focus: FormField::Title,
            error: None,
            submitting: false,
        }
    }

    /// Fields in tab order. The category is only chosen on create.
    pub fn fields(&self) -> &'static [FormField] {
        match self.kind {
            FormKind::Create => &[
                FormField::Title,
                FormField::Price,
                FormField::Description,
                FormField::Category,
            ],
            FormKind::Edit(_) => &[FormField::Title, FormField::Price, FormField::Description],
        }
    }

    pub fn focus_next(&mut self) {
        let fields = self.fields();
        let index = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(index + 1) % fields.len()];
    }

    pub fn focus_previous(&mut self) {
        let fields = self.fields();
        let index = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(index + fields.len() - 1) % fields.len()];
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Price => Some(&mut self.price),
            FormField::Description => Some(&mut self.description),
            FormField::Category => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(text) = self.focused_text() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text() {
            text.pop();
        }
    }

    /// Step through the category choices, starting at either end when unset
    pub fn cycle_category(&mut self, forward: bool) {
        self.category = Some(match (self.category, forward) {
            (Some(choice), true) => choice.next(),
            (Some(choice), false) => choice.previous(),
            (None, true) => CategoryChoice::Electronics,
            (None, false) => CategoryChoice::Clothes,
        });
    }

    /// Validate the form. On failure the error is kept on the form and the
    /// offending field takes focus.
    pub fn submit(&mut self) -> Result<FormSubmission, ValidationError> {
        let result = match self.kind {
            FormKind::Create => {
                ProductDraft::from_input(&self.title, &self.price, &self.description, self.category)
                    .map(FormSubmission::Create)
            }
            FormKind::Edit(id) => {
                ProductChanges::from_input(&self.title, &self.price, &self.description)
                    .map(|changes| FormSubmission::Update { id, changes })
            }
        };

        match &result {
            Ok(_) => self.error = None,
            Err(error) => {
                self.focus = error.field();
                self.error = Some(error.clone());
            }
        }
        result
    }

    pub fn heading(&self) -> String {
        match self.kind {
            FormKind::Create => "New product".to_string(),
            FormKind::Edit(id) => format!("Edit product #{}", id),
        }
    }
}

/// Renders the form as a centered overlay
pub struct ProductFormRenderer;

impl ProductFormRenderer {
    pub fn render(frame: &mut Frame, area: Rect, form: &ProductForm, theme: &Theme) {
        let height = form.fields().len() as u16 * 3 + 6;
        let popup = centered_rect(60, height, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(format!(" {} ", form.heading()))
            .borders(Borders::ALL)
            .border_style(theme.border_style(true))
            .style(Style::default().bg(theme.colors.palette.surface));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let mut constraints: Vec<Constraint> =
            form.fields().iter().map(|_| Constraint::Length(3)).collect();
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(1));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (index, field) in form.fields().iter().enumerate() {
            Self::render_field(frame, rows[index], form, *field, theme);
        }

        let error_row = rows[form.fields().len()];
        if let Some(error) = &form.error {
            let error_line = Paragraph::new(Line::from(Span::styled(
                error.to_string(),
                Style::default()
                    .fg(theme.colors.palette.error)
                    .add_modifier(Modifier::BOLD),
            )));
            frame.render_widget(error_line, error_row);
        } else if form.submitting {
            let saving = Paragraph::new(Span::styled("Saving...", theme.muted_style()));
            frame.render_widget(saving, error_row);
        }

        let hint_row = rows[form.fields().len() + 1];
        let hints = Paragraph::new(Span::styled(
            "Tab next field  Enter save  Esc cancel",
            theme.muted_style(),
        ));
        frame.render_widget(hints, hint_row);
    }

    fn render_field(frame: &mut Frame, area: Rect, form: &ProductForm, field: FormField, theme: &Theme) {
        let focused = form.focus == field;
        let has_error = form.error.as_ref().map(|e| e.field()) == Some(field);

        let border_style = if has_error {
            Style::default().fg(theme.colors.palette.error)
        } else {
            theme.border_style(focused)
        };

        let value = match field {
            FormField::Title => form.title.clone(),
            FormField::Price => form.price.clone(),
            FormField::Description => form.description.clone(),
            FormField::Category => match form.category {
                Some(choice) => format!("◀ {} ▶", choice.name()),
                None => "◀ Select a category ▶".to_string(),
            },
        };
        let cursor = if focused && field != FormField::Category { "▏" } else { "" };

        let input = Paragraph::new(Line::from(vec![
            Span::styled(value, Style::default().fg(theme.colors.palette.text_primary)),
            Span::styled(cursor, Style::default().fg(theme.colors.palette.accent)),
        ]))
        .block(
            Block::default()
                .title(format!(" {} ", field))
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(input, area);
    }
}

/// Rect of `percent_x` width and fixed `height`, centered in `area`
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let width = area.width * percent_x / 100;
    Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    #[test]
    fn test_edit_form_prefills_from_product() {
        let product = Product::new(3, "Chair", 50.0)
            .with_description("Oak")
            .with_category(Category::new(2, "Furniture"));
        let form = ProductForm::edit(&product);
        assert_eq!(form.title, "Chair");
        assert_eq!(form.price, "50");
        assert_eq!(form.description, "Oak");
        assert_eq!(form.category, Some(CategoryChoice::Furniture));
        assert_eq!(form.fields().len(), 3);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = ProductForm::create();
        form.insert_char('H');
        form.insert_char('i');
        form.focus_next();
        form.insert_char('9');
        form.backspace();
        form.insert_char('5');
        assert_eq!(form.title, "Hi");
        assert_eq!(form.price, "5");

        form.focus = FormField::Category;
        form.insert_char('x');
        assert_eq!(form.category, None);
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = ProductForm::create();
        form.focus_previous();
        assert_eq!(form.focus, FormField::Category);
        form.focus_next();
        assert_eq!(form.focus, FormField::Title);
    }

    #[test]
    fn test_cycle_category_from_unset() {
        let mut form = ProductForm::create();
        form.cycle_category(false);
        assert_eq!(form.category, Some(CategoryChoice::Clothes));
        form.cycle_category(true);
        assert_eq!(form.category, Some(CategoryChoice::Electronics));
    }

    #[test]
    fn test_failed_submit_focuses_field() {
        let mut form = ProductForm::create();
        form.title = "Lamp".to_string();
        form.price = "abc".to_string();
        let err = form.submit().unwrap_err();
        assert_eq!(err.field(), FormField::Price);
        assert_eq!(form.focus, FormField::Price);
        assert_eq!(form.error, Some(err));

        form.price = "12".to_string();
        assert_eq!(form.submit(), Err(ValidationError::MissingCategory));

        form.cycle_category(true);
        assert!(matches!(form.submit(), Ok(FormSubmission::Create(_))));
        assert_eq!(form.error, None);
    }

    #[test]
    fn test_edit_submit_yields_update() {
        let mut form = ProductForm::edit(&Product::new(9, "Desk", 80.0));
        form.description = "  walnut ".to_string();
        match form.submit().unwrap() {
            FormSubmission::Update { id, changes } => {
                assert_eq!(id, 9);
                assert_eq!(changes.description, "walnut");
            }
            other => panic!("unexpected submission: {:?}", other),
        }
    }
}
