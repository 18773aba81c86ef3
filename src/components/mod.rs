//! UI Components

mod new_todo_form;
mod sign_in;
mod theme_toggle;
mod todo_item;

pub use new_todo_form::NewTodoForm;
pub use sign_in::SignIn;
pub use theme_toggle::ThemeToggle;
pub use todo_item::TodoItem;
