#![deny(missing_docs)]
#![doc = "Core error, unit and wavefunction types shared by the quasiprobability crates."]

pub mod errors;
pub mod states;
pub mod units;
pub mod wavefunction;

pub use errors::{ErrorInfo, QpdError};
pub use num_complex::Complex64;
pub use states::{GaussianPacket, HarmonicEigenstate};
pub use units::Hbar;
pub use wavefunction::{TryWavefunction, Wavefunction};
