//! Generic parallel execution framework
//!
//! This module runs one batch of independent tasks and returns only when all
//! of them are done. The search coordinator uses it once per outward level,
//! which makes every call a barrier.
//!
//! # Architecture Responsibilities
//!
//! The parallel module focuses exclusively on **system resource management** and **execution strategy**:
//!
//! ## What This Module Does:
//! - **Resource Discovery**: Detects available CPU cores using `num_cpus::get()`
//! - **Resource Calculation**: Applies user configuration (thread percentage, max threads) to available resources
//! - **Execution Strategy**: Sequential, bounded worker pool, or one thread per task
//! - **Failure Isolation**: A panicking task is caught and reported without stopping its siblings
//!
//! ## What This Module Does NOT Do:
//! - **Domain Logic**: Does not know about directories, predicates or cancellation
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │   Client        │    │   Parallel       │    │   System        │
//! │   (Coordinator) │───▶│   Module         │───▶│   Resources     │
//! │                 │    │                  │    │                 │
//! │ • Level entries │    │ • CPU cores      │    │ • Hardware      │
//! │ • Descent task  │    │ • Scoped threads │    │ • OS limits     │
//! │ • Cancellation  │    │ • Barrier        │    │                 │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use backsearch::parallel::{execute, ExecutionStrategy};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let items = vec![1, 2, 3, 4];
//! let total = AtomicUsize::new(0);
//! let failures = execute(ExecutionStrategy::Parallel { workers: 2 }, &items, |n| {
//!     total.fetch_add(*n, Ordering::Relaxed);
//! });
//! assert!(failures.is_empty());
//! assert_eq!(total.load(Ordering::Relaxed), 10);
//! ```

pub mod core;
pub mod processor;

// Re-export main types for easier access
pub use self::core::{ExecutionMode, ExecutionStrategy};
pub use self::processor::{execute, ParallelConfig, TaskFailure};
