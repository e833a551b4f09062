//! Kernel functions and the family registry

pub mod chi_square;
pub mod family;
pub mod gaussian;
pub mod laplacian;
pub mod linear;
pub mod polynomial;
pub mod sigmoid;
pub mod traits;

pub use self::chi_square::ChiSquareKernel;
pub use self::family::KernelFamily;
pub use self::gaussian::GaussianKernel;
pub use self::laplacian::LaplacianKernel;
pub use self::linear::LinearKernel;
pub use self::polynomial::PolynomialKernel;
pub use self::sigmoid::SigmoidKernel;
pub use self::traits::*;
