//! Infrastructure Layer
//!
//! 六边形架构的适配器与技术实现

pub mod adapters;
pub mod http;
pub mod memory;
