pub mod forms;
pub mod page;

pub use forms::{AuthForms, FormOutcome, LoginForm, SignupForm};
pub use page::PageState;
