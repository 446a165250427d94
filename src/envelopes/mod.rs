//! Envelope generators that shape a tone's amplitude over time.

mod fade;

pub use fade::Fade;
