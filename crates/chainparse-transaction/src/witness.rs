//! Attaching externally parsed witness stacks to inputs.
//!
//! Witness data is carried outside the input records of a segwit
//! transaction. Whatever parses that section hands the stacks over through
//! `WitnessProvider`, keyed by input position.

use tracing::trace;

use crate::Input;

/// Source of witness stacks keyed by input index.
pub trait WitnessProvider {
    /// The witness stack of the input at `index`, if it has one.
    fn witnesses_for(&self, index: usize) -> Option<Vec<Vec<u8>>>;
}

impl WitnessProvider for [Vec<Vec<u8>>] {
    fn witnesses_for(&self, index: usize) -> Option<Vec<Vec<u8>>> {
        self.get(index).filter(|stack| !stack.is_empty()).cloned()
    }
}

impl WitnessProvider for Vec<Vec<Vec<u8>>> {
    fn witnesses_for(&self, index: usize) -> Option<Vec<Vec<u8>>> {
        self.as_slice().witnesses_for(index)
    }
}

impl<P: WitnessProvider + ?Sized> WitnessProvider for &P {
    fn witnesses_for(&self, index: usize) -> Option<Vec<Vec<u8>>> {
        (**self).witnesses_for(index)
    }
}

/// Attach witness stacks to `inputs` by position.
///
/// Inputs the provider has nothing for are left untouched.
///
/// # Returns
/// The number of inputs that received a witness stack.
pub fn attach_witnesses<P: WitnessProvider + ?Sized>(inputs: &mut [Input], provider: &P) -> usize {
    let mut attached = 0;
    for (index, input) in inputs.iter_mut().enumerate() {
        if let Some(stack) = provider.witnesses_for(index) {
            trace!(index, items = stack.len(), "attached witness");
            input.set_witnesses(stack);
            attached += 1;
        }
    }
    attached
}
