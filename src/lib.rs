//! Construction schedule engine for self-build residential projects.
//!
//! Turns a target start date (and optionally the project's current
//! stage) into a fully dated, phase-ordered schedule; re-derives dates
//! when steps move; raises supplier and fabrication lead-time alerts;
//! and detects day-level trade conflicts and mandatory curing windows.
//! Persistence and display are delegated to collaborators behind the
//! `storage` traits — this crate is a library invoked by the
//! surrounding application and owns no protocol or CLI.
//!
//! # Modules
//!
//! - **`calendar`**: business-day arithmetic, the foundation of every
//!   date computation
//! - **`models`**: domain types — `Phase`, `ScheduleItem`,
//!   `ManualTask`, `ScheduleAlert`
//! - **`catalog`**: the injected phase/trade configuration, with the
//!   standard self-build catalog
//! - **`scheduler`**: backward/forward planning passes, re-chaining,
//!   duration estimates
//! - **`curing`**: advisory mandatory-delay windows (concrete curing)
//! - **`alerts`**: lead-time reminder derivation
//! - **`conflict`**: day-level trade conflict detection
//! - **`validation`**: catalog integrity checks
//! - **`storage`**: persistence contracts and the in-memory reference
//!   store
//! - **`engine`**: the generation/update orchestration entry points
//!
//! # Dataflow
//!
//! Generation runs one way: catalog → backward/forward planner →
//! persisted rows → alert pass. Analysis runs the other: persisted
//! rows + manual tasks → conflict detector → calendar/Gantt views.
//! Every pass is a pure, synchronous computation; only the storage
//! boundary can fail.
//!
//! Dates cross every boundary as ISO `yyyy-MM-dd` strings and live as
//! `chrono::NaiveDate` internally.

pub mod alerts;
pub mod calendar;
pub mod catalog;
pub mod conflict;
pub mod curing;
pub mod engine;
pub mod models;
pub mod scheduler;
pub mod storage;
pub mod validation;
