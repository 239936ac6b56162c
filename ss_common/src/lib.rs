mod centavos;
mod events;

pub use centavos::{Centavos, CentavosConversionError, CENTAVOS_PER_PESO};
pub use events::{OrderReadyEvent, ORDER_READY_EVENT};
