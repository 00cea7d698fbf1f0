//! Tests for the template compiler front-end and evaluator

use super::*;

mod helpers;


mod render_escaping;
mod render_capture;

mod timeouts;
