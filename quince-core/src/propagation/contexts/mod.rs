mod propagation_context;

pub use propagation_context::NotificationContext;
pub use propagation_context::PropagationContext;
pub use propagation_context::PropagationContextMut;
pub use propagation_context::ReadDomains;

pub(crate) use propagation_context::private;
