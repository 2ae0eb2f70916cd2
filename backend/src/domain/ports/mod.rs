//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod template_renderer;
mod user_store;

#[cfg(test)]
pub use template_renderer::MockTemplateRenderer;
pub use template_renderer::{TemplateError, TemplateRenderer};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{UserStore, UserStoreError};
