//! End-to-end tests driving `Vm` through its public entry points only,
//! mirroring how a host embedding this crate would exercise it. Unit tests
//! for individual modules live alongside their code instead.

mod test_heap;
mod test_pool;
