//! Embedding Module: Sliding-Window (Delay) Embedding
//!
//! A scalar series x(t) becomes the point cloud
//!
//!   SW(t) = [x(t), x(t + τ), …, x(t + (dim-1)τ)]
//!
//! sampled at t = 0, dT, 2dT, … . A periodic signal traces a closed loop
//! in ℝ^dim; the loop's roundness and persistence quantify periodicity.
//!
//! Because τ and dT are real-valued, coordinates generally fall between
//! samples and are reconstructed with a cubic spline (`spline.rs`).

mod sliding_window;
mod spline;

pub use sliding_window::{embed, EmbeddingMatrix, SlidingWindowEmbedder, WindowSupport};
pub use spline::CubicSpline;
