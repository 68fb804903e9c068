//! Operation boundary macros
//!
//! The engine wraps each of its operations (`classify`, `seed_import`,
//! `results_list`, `result_get`, `catalog_summary`) in one `start` event and
//! exactly one of `end` or `end_error`. Core and store code below the engine
//! only log at `debug`/`trace` and never emit boundaries.
//!
//! Extra fields are passed through to `tracing` unchanged, so `%value` and
//! `?value` work as usual.

/// Open an operation boundary at `info`
///
/// ```
/// # use ceosdb_core::log_op_start;
/// log_op_start!("classify");
/// log_op_start!("classify", run_id = "0190a1b2", dry_run = false);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_START,
            $($($field)+)?
        )
    };
}

/// Close an operation boundary at `info`; `duration_ms` is mandatory
///
/// ```
/// # use ceosdb_core::log_op_end;
/// log_op_end!("seed_import", duration_ms = 12);
/// log_op_end!("classify", duration_ms = 40, group_count = 31, labelled_count = 28);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)+)?
        )
    };
}

/// Close an operation boundary at `error`
///
/// The error is converted into [`ExError`](crate::errors::ExError) so the
/// event carries its stable `err.code` whether the caller held a
/// `CeosError` or an already structured error.
///
/// ```
/// # use ceosdb_core::{log_op_error, errors::CeosError};
/// let err = CeosError::MissionNotFound { mission_id: 1 };
/// log_op_error!("classify", err, duration_ms = 3, run_id = "0190a1b2");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            $($($field)+)?
        );
    }};
}
