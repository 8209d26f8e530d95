//! Call tracing for fallible functions
//!
//! [`instrument`] wraps a function so that every call logs its arguments,
//! its result and elapsed time, or the error it returned. Errors come back
//! wrapped in [`Traced`], which remembers that they were already logged so
//! that wrapping layers further up the call chain stay quiet.

use crate::core::logger::append_backtrace;
use crate::core::{Logger, Value};
use std::backtrace::Backtrace;
use std::fmt::{self, Debug, Display};
use std::ops::Deref;
use std::sync::Arc;
use std::time::Instant;

const ARG_REPR_LIMIT: usize = 50;
const SIGNATURE_LIMIT: usize = 200;
const RESULT_REPR_LIMIT: usize = 200;

/// An error returned through an instrumented call
#[derive(Debug)]
pub struct Traced<E> {
    error: E,
    logged: bool,
}

impl<E> Traced<E> {
    /// Wrap an error that has not been logged yet
    pub fn new(error: E) -> Self {
        Self {
            error,
            logged: false,
        }
    }

    pub fn is_logged(&self) -> bool {
        self.logged
    }

    pub fn mark_logged(&mut self) {
        self.logged = true;
    }

    pub fn inner(&self) -> &E {
        &self.error
    }

    pub fn into_inner(self) -> E {
        self.error
    }
}

impl<E> From<E> for Traced<E> {
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl<E> Deref for Traced<E> {
    type Target = E;

    fn deref(&self) -> &E {
        &self.error
    }
}

impl<E: Display> Display for Traced<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.error, f)
    }
}

impl<E: std::error::Error> std::error::Error for Traced<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.error.source()
    }
}

/// Argument tuples an instrumented function can take
pub trait CallArgs {
    /// `Debug` representation of each argument, in order
    fn reprs(&self) -> Vec<String>;
}

impl CallArgs for () {
    fn reprs(&self) -> Vec<String> {
        Vec::new()
    }
}

macro_rules! impl_call_args {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: Debug),+> CallArgs for ($($name,)+) {
            fn reprs(&self) -> Vec<String> {
                vec![$(format!("{:?}", self.$idx)),+]
            }
        }
    };
}

impl_call_args!(A: 0);
impl_call_args!(A: 0, B: 1);
impl_call_args!(A: 0, B: 1, C: 2);
impl_call_args!(A: 0, B: 1, C: 2, D: 3);
impl_call_args!(A: 0, B: 1, C: 2, D: 3, F: 4);

/// Wrap `f` so that each call is traced on `logger`.
///
/// Logs `[CALL] name(args)` at `DEBUG` before the call and
/// `[RETURN] name -> result (N.NNNNs)` after it. A failing call is logged
/// once at `ERROR` with a traceback; an error that an inner instrumented
/// call already logged is passed through silently.
///
/// # Example
///
/// ```
/// use pretty_logger_system::prelude::*;
/// use std::sync::Arc;
///
/// let logger = Arc::new(Logger::builder().sink(Arc::new(BufferSink::new())).build());
/// let divide = instrument(logger, "divide", |(a, b): (i32, i32)| {
///     if b == 0 {
///         Err("division by zero")
///     } else {
///         Ok(a / b)
///     }
/// });
///
/// assert_eq!(divide((6, 3)).unwrap(), 2);
/// let err = divide((1, 0)).unwrap_err();
/// assert!(err.is_logged());
/// assert_eq!(err.into_inner(), "division by zero");
/// ```
pub fn instrument<A, T, E, R, F>(
    logger: Arc<Logger>,
    name: impl Into<String>,
    f: F,
) -> impl Fn(A) -> Result<T, Traced<E>>
where
    A: CallArgs,
    T: Debug,
    E: Display,
    R: Into<Traced<E>>,
    F: Fn(A) -> Result<T, R>,
{
    let name = name.into();
    move |args: A| {
        let signature = signature(&args.reprs());
        run_traced(&logger, &name, &signature, || f(args))
    }
}

impl Logger {
    /// Run `f` once, traced like an [`instrument`]ed function without arguments
    pub fn traced<T, E, R, F>(&self, name: &str, f: F) -> Result<T, Traced<E>>
    where
        T: Debug,
        E: Display,
        R: Into<Traced<E>>,
        F: FnOnce() -> Result<T, R>,
    {
        run_traced(self, name, "", f)
    }
}

fn run_traced<T, E, R, F>(
    logger: &Logger,
    name: &str,
    signature: &str,
    f: F,
) -> Result<T, Traced<E>>
where
    T: Debug,
    E: Display,
    R: Into<Traced<E>>,
    F: FnOnce() -> Result<T, R>,
{
    logger.debug(format!("[CALL] {}({})", name, signature));

    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed().as_secs_f64();

    match result {
        Ok(value) => {
            let repr = format!("{:?}", value);
            logger.debug(format!(
                "[RETURN] {} -> {} ({:.4}s)",
                name,
                truncate(&repr, RESULT_REPR_LIMIT),
                elapsed
            ));
            Ok(value)
        }
        Err(error) => {
            let mut error: Traced<E> = error.into();
            if !error.is_logged() {
                let mut traceback = format!("Error: {}", error.inner());
                append_backtrace(&mut traceback, &Backtrace::capture());
                logger.exception_with_traceback(
                    vec![Value::from(format!(
                        "[ERROR] {} raised {}: {} ({:.4}s)",
                        name,
                        short_type_name::<E>(),
                        error.inner(),
                        elapsed
                    ))],
                    traceback,
                );
                error.mark_logged();
            }
            Err(error)
        }
    }
}

fn signature(reprs: &[String]) -> String {
    let joined = reprs
        .iter()
        .map(|repr| truncate(repr, ARG_REPR_LIMIT))
        .collect::<Vec<_>>()
        .join(", ");
    truncate(&joined, SIGNATURE_LIMIT).to_string()
}

/// First `limit` characters of `text`
fn truncate(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// `std::io::Error` -> `Error`, `Vec<u8>` -> `Vec`
fn short_type_name<E>() -> &'static str {
    let full = std::any::type_name::<E>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DispatchRecord, OwnedRecord, Severity};
    use crate::sinks::BufferSink;
    use parking_lot::Mutex;

    fn logger() -> (Arc<Logger>, Arc<Mutex<Vec<OwnedRecord>>>) {
        let logger = Arc::new(
            Logger::builder()
                .sink(Arc::new(BufferSink::new()))
                .build(),
        );
        let records = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&records);
        logger.add_handler(move |r: &DispatchRecord<'_>| {
            sink.lock().push(r.to_owned_record());
            Ok(())
        });
        (logger, records)
    }

    fn first_text(record: &OwnedRecord) -> String {
        record.parts[0].to_string()
    }

    #[test]
    fn test_success_logs_call_and_return() {
        let (logger, records) = logger();
        let add = instrument(Arc::clone(&logger), "add", |(a, b): (i32, i32)| {
            Ok::<_, String>(a + b)
        });

        assert_eq!(add((2, 3)).unwrap(), 5);

        let records = records.lock();
        assert_eq!(records.len(), 2);
        assert_eq!(first_text(&records[0]), "[CALL] add(2, 3)");
        assert_eq!(records[0].severity, Some(Severity::Debug));
        let ret = first_text(&records[1]);
        assert!(ret.starts_with("[RETURN] add -> 5 ("), "{}", ret);
        assert!(ret.ends_with("s)"));
    }

    #[test]
    fn test_error_logged_once_and_returned() {
        let (logger, records) = logger();
        let fail = instrument(Arc::clone(&logger), "fail", |(): ()| {
            Err::<(), _>(std::io::Error::other("boom"))
        });

        let err = fail(()).unwrap_err();
        assert!(err.is_logged());
        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.kind(), std::io::ErrorKind::Other);

        let records = records.lock();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].level, "ERROR");
        let text = first_text(&records[1]);
        assert!(text.starts_with("[ERROR] fail raised Error: boom ("), "{}", text);
        assert!(records[1]
            .traceback
            .as_deref()
            .unwrap()
            .starts_with("Error: boom"));
    }

    #[test]
    fn test_nested_error_not_logged_twice() {
        let (logger, records) = logger();
        let inner = instrument(Arc::clone(&logger), "inner", |(): ()| {
            Err::<(), _>("bad input".to_string())
        });
        let outer = instrument::<_, _, String, _, _>(Arc::clone(&logger), "outer", move |(): ()| {
            inner(())
        });

        let err = outer(()).unwrap_err();
        assert!(err.is_logged());
        assert_eq!(err.into_inner(), "bad input");

        let records = records.lock();
        let errors: Vec<_> = records.iter().filter(|r| r.level == "ERROR").collect();
        assert_eq!(errors.len(), 1);
        assert!(first_text(errors[0]).starts_with("[ERROR] inner raised String: bad input"));
        // CALL outer, CALL inner, ERROR inner
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_argument_and_signature_truncation() {
        let (logger, records) = logger();
        let long = "x".repeat(80);
        let echo = instrument(Arc::clone(&logger), "echo", |(s,): (String,)| {
            Ok::<_, String>(s)
        });

        echo((long.clone(),)).unwrap();

        let records = records.lock();
        let call = first_text(&records[0]);
        let expected_arg: String = format!("{:?}", long).chars().take(50).collect();
        assert_eq!(call, format!("[CALL] echo({})", expected_arg));

        let ret = first_text(&records[1]);
        assert!(ret.contains(&format!("-> {:?} (", long)));

        let wide: Vec<String> = (0..10).map(|_| "y".repeat(30)).collect();
        let sig = signature(&wide);
        assert_eq!(sig.chars().count(), 200);
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("héllo", 2), "hé");
        assert_eq!(truncate("abc", 10), "abc");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn test_suppressed_threshold_still_returns() {
        let (logger, records) = logger();
        logger.set_threshold(Severity::Critical);
        let id = instrument(Arc::clone(&logger), "id", |(v,): (u8,)| Ok::<_, String>(v));
        assert_eq!(id((7,)).unwrap(), 7);
        assert!(records.lock().is_empty());
    }

    #[test]
    fn test_logger_traced() {
        let (logger, records) = logger();
        let value = logger.traced("compute", || Ok::<_, String>(vec![1, 2])).unwrap();
        assert_eq!(value, vec![1, 2]);

        let err = logger
            .traced::<(), String, _, _>("explode", || Err("nope".to_string()))
            .unwrap_err();
        assert!(err.is_logged());

        let records = records.lock();
        assert_eq!(first_text(&records[0]), "[CALL] compute()");
        assert!(first_text(&records[1]).starts_with("[RETURN] compute -> [1, 2] ("));
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name::<std::io::Error>(), "Error");
        assert_eq!(short_type_name::<Vec<u8>>(), "Vec");
        assert_eq!(short_type_name::<String>(), "String");
    }
}
