/*!
 * Validation of provider output.
 *
 * - `markers`: detects provider error messages returned as translations
 * - `service`: the `ResultValidator` used by the orchestrator
 */

pub mod markers;
pub mod service;

pub use service::ResultValidator;
