//! # Sequence layers
//!
//! [`Lstm`] runs an [`LSTMCell`](crate::cells::LSTMCell) over a sequence and
//! returns every hidden output together with the final state.
//!
//! ## Tensor Shapes
//!
//! | Format | Shape | Default |
//! |--------|-------|---------|
//! | Batch-first | `[batch, seq_len, features]` | ✓ Yes |
//! | Sequence-first | `[seq_len, batch, features]` | No |
//!
//! Use `.with_batch_first(false)` to switch to sequence-first format. The
//! output sequence uses the same layout as the input.
//!
//! ```ignore
//! let lstm = Lstm::<Backend>::new(input_size, hidden_size, &device);
//!
//! let (output, state) = lstm.forward(input, None);
//! // output: [batch, seq_len, hidden_size] ([seq_len, batch, hidden_size] sequence-first)
//! // state.hidden, state.cell: [batch, hidden_size]
//!
//! let (output, state) = lstm.forward(next, Some(state));
//! ```

pub mod lstm;

pub use lstm::Lstm;
