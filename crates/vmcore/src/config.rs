/// Construction-time configuration for a [`crate::vm::Vm`].
///
/// Mirrors the host-visible knobs named in the VM's external interface:
/// stack capacity, the native-library load switch, and the pool's block
/// granularity.
#[derive(Debug, Clone)]
pub struct VmConfig {
    /// Reserved for a future native-library crate; plumbed through but inert here
    /// since the standard library is out of scope for the execution core.
    pub load_builtins: bool,
    /// Capacity of both the evaluation stack and the locals stack.
    pub stack_size: usize,
    /// Objects per pool block (`RT_OBJECT_POOL_GRANULARITY`).
    pub pool_granularity: usize,
    /// Initial `gc_max_count` threshold before the first collection is forced.
    pub gc_initial_threshold: usize,
}

impl Default for VmConfig {
    fn default() -> Self {
        Self {
            load_builtins: true,
            stack_size: 8192,
            pool_granularity: 64,
            gc_initial_threshold: 16,
        }
    }
}
