use log::{error, trace, warn};
use rand::Rng;

use crate::error::Chip8Error;
use crate::instruction::Instruction;
use crate::quirks::Quirks;
use crate::state::State;

/// Runs a single fetch-decode-execute cycle
///
/// The pc is moved past the instruction before it executes, so jumps and
/// calls overwrite it and skips add to it. Nothing here fails: a word that
/// doesn't decode is reported and skipped, and a call or return the stack
/// can't honour is reported and ignored.
pub fn step<R: Rng>(state: &mut State, rng: &mut R, quirks: &Quirks) {
    let address = state.pc;
    let op = state.fetch();
    state.pc = state.pc.wrapping_add(2);

    let result = Instruction::decode(op, address).and_then(|instruction| {
        trace!(
            "{:03X}: {:04X} {:<16} v{:02X?} i{:03X}",
            address,
            op,
            instruction.to_string(),
            state.v,
            state.i
        );
        instruction.execute(state, rng, quirks)
    });

    match result {
        Ok(()) => {}
        Err(e @ Chip8Error::UnrecognizedOpcode { .. }) => warn!("{}", e),
        Err(e) => error!("{}", e),
    }
}
