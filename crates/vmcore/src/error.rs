/// Lightweight error enum - one byte.
/// Actual error message, when present, is carried by [`VmFullError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmError {
    /// Generic runtime error raised by an opcode (div by zero, bad coercion, ...).
    RuntimeError,
    /// `alloc::<T>()` requested a size that fits neither the small nor the big pool.
    BadGcAllocSize,
    /// `call()`/`CallNative`/`Call` referenced a name not in the function table.
    UnknownFunction,
    /// Argument count did not match the callee's declared arity.
    ArgMismatch,
    /// An operand had the wrong runtime type for the opcode.
    TypeError,
    /// Integer division or modulo by zero.
    DivByZero,
    /// Array/object index outside the valid range.
    IndexOutOfRange,
    /// Evaluation or locals stack would exceed its fixed capacity.
    StackOverflow,
    /// Pop/top/topN requested more slots than are occupied.
    StackUnderflow,
    /// The dispatch callback returned `false`; execution was suspended, not failed.
    Cancelled,
    /// `Halt` was reached; not an error, but unwinds through the same `Result` path.
    Halted,
}

impl std::fmt::Display for VmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VmError::RuntimeError => write!(f, "runtime error"),
            VmError::BadGcAllocSize => write!(f, "bad gc allocation size"),
            VmError::UnknownFunction => write!(f, "unknown function"),
            VmError::ArgMismatch => write!(f, "argument mismatch"),
            VmError::TypeError => write!(f, "type error"),
            VmError::DivByZero => write!(f, "division by zero"),
            VmError::IndexOutOfRange => write!(f, "index out of range"),
            VmError::StackOverflow => write!(f, "stack overflow"),
            VmError::StackUnderflow => write!(f, "stack underflow"),
            VmError::Cancelled => write!(f, "execution cancelled by host callback"),
            VmError::Halted => write!(f, "vm halted"),
        }
    }
}

impl std::error::Error for VmError {}

/// Rich error combining a [`VmError`] kind with a human-readable message and,
/// when `save_callstack` is enabled, a formatted traceback.
///
/// Implements `Display`/`std::error::Error` so it composes with `anyhow`,
/// `thiserror`, and `?`, without forcing every `Result<T, VmError>` in the
/// hot dispatch loop to carry a `String`.
#[derive(Debug, Clone)]
pub struct VmFullError {
    pub kind: VmError,
    pub message: String,
    pub traceback: Option<String>,
}

impl VmFullError {
    pub fn new(kind: VmError, message: impl Into<String>) -> Self {
        Self { kind, message: message.into(), traceback: None }
    }

    pub fn with_traceback(mut self, traceback: impl Into<String>) -> Self {
        self.traceback = Some(traceback.into());
        self
    }

    #[inline]
    pub fn kind(&self) -> VmError {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for VmFullError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)?;
        } else {
            write!(f, "{}", self.message)?;
        }
        if let Some(tb) = &self.traceback {
            write!(f, "\n{tb}")?;
        }
        Ok(())
    }
}

impl std::error::Error for VmFullError {}

pub type VmResult<T> = Result<T, VmError>;
