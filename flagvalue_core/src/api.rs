mod capture;
mod mapping;
mod scalar;
mod sequence;

pub use capture::InvalidValue;
pub use mapping::Mapping;
pub use scalar::Scalar;
pub use sequence::Sequence;
