//! Instruction behaviours.
//!
//! Every function here runs after the program counter has already been moved
//! past the instruction, so `state.pc` is the address of the next instruction.
//! Skips add another 2; jumps overwrite it.
use log::trace;
use rand::Rng;

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_PIXELS, DISPLAY_WIDTH, FONT_GLYPH_BYTES, VF};
use crate::error::Result;
use crate::quirks::Quirks;
use crate::state::State;

fn skip_if(state: &mut State, condition: bool) {
    if condition {
        state.pc = state.pc.wrapping_add(2);
    }
}

/// Address of the instruction being executed
fn current_address(state: &State) -> u16 {
    state.pc.wrapping_sub(2)
}

/// clear
pub fn clr(state: &mut State) {
    state.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
    state.draw_flag = true;
}

/// PC = STACK.pop()
pub fn rts(state: &mut State) -> Result<()> {
    let address = current_address(state);
    state.pc = state.pop(address)?;
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut State, nnn: u16) {
    state.pc = nnn;
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, nnn: u16) -> Result<()> {
    let address = current_address(state);
    state.push(state.pc, address)?;
    state.pc = nnn;
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(state: &mut State, x: usize, kk: u8) {
    let condition = state.v[x] == kk;
    skip_if(state, condition);
}

/// if Vx != kk then pc += 2
pub fn skne(state: &mut State, x: usize, kk: u8) {
    let condition = state.v[x] != kk;
    skip_if(state, condition);
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: usize, y: usize) {
    let condition = state.v[x] == state.v[y];
    skip_if(state, condition);
}

/// Vx = kk
pub fn load(state: &mut State, x: usize, kk: u8) {
    state.v[x] = kk;
}

/// Vx += kk
/// The carry is dropped and VF is left alone
pub fn add(state: &mut State, x: usize, kk: u8) {
    state.v[x] = state.v[x].wrapping_add(kk);
}

/// Vx = Vy
pub fn mv(state: &mut State, x: usize, y: usize) {
    state.v[x] = state.v[y];
}

/// Vx |= Vy
pub fn or(state: &mut State, x: usize, y: usize) {
    state.v[x] |= state.v[y];
}

/// Vx &= Vy
pub fn and(state: &mut State, x: usize, y: usize) {
    state.v[x] &= state.v[y];
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: usize, y: usize) {
    state.v[x] ^= state.v[y];
}

// The arithmetic below writes VF after Vx, so with x == F the flag wins.

/// Vx += Vy; VF = carry
pub fn addr(state: &mut State, x: usize, y: usize) {
    let (res, carry) = state.v[x].overflowing_add(state.v[y]);
    state.v[x] = res;
    state.v[VF] = carry as u8;
}

/// Vx -= Vy; VF = Vx >= Vy
pub fn sub(state: &mut State, x: usize, y: usize) {
    let (vx, vy) = (state.v[x], state.v[y]);
    state.v[x] = vx.wrapping_sub(vy);
    state.v[VF] = (vx >= vy) as u8;
}

/// Vx >>= 1; VF = shifted out bit
pub fn shr(state: &mut State, x: usize, y: usize, quirks: &Quirks) {
    let source = if quirks.shift_reads_vy { state.v[y] } else { state.v[x] };
    state.v[x] = source >> 1;
    state.v[VF] = source & 0x1;
}

/// Vx = Vy - Vx; VF = Vy >= Vx
pub fn subn(state: &mut State, x: usize, y: usize) {
    let (vx, vy) = (state.v[x], state.v[y]);
    state.v[x] = vy.wrapping_sub(vx);
    state.v[VF] = (vy >= vx) as u8;
}

/// Vx <<= 1; VF = shifted out bit
pub fn shl(state: &mut State, x: usize, y: usize, quirks: &Quirks) {
    let source = if quirks.shift_reads_vy { state.v[y] } else { state.v[x] };
    state.v[x] = source << 1;
    state.v[VF] = source >> 7;
}

/// if Vx != Vy then pc +=2
pub fn skrne(state: &mut State, x: usize, y: usize) {
    let condition = state.v[x] != state.v[y];
    skip_if(state, condition);
}

/// I = addr
pub fn loadi(state: &mut State, nnn: u16) {
    state.i = nnn;
}

/// PC = V0 + addr
pub fn jumpi(state: &mut State, nnn: u16) {
    state.pc = nnn + u16::from(state.v[0x0]);
}

/// Vx = rand_byte & kk
pub fn rand<R: Rng>(state: &mut State, x: usize, kk: u8, rng: &mut R) {
    let rand_byte: u8 = rng.gen();
    state.v[x] = rand_byte & kk;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs a sprite from memory i..i+n at position x, y on the FrameBuffer with wrapping.
/// Sets VF if any pixels are erased; the frame is marked dirty even if nothing changed.
pub fn draw(state: &mut State, x: usize, y: usize, n: u8, quirks: &Quirks) {
    // Latch the coordinates before VF is reset, in case x or y is F
    let (origin_x, origin_y) = (state.v[x] as usize, state.v[y] as usize);
    state.v[VF] = 0x0;

    for row in 0..n as usize {
        let sprite_row = state.read_byte(state.i.wrapping_add(row as u16));
        for column in 0..8 {
            if sprite_row & (0x80u8 >> column) == 0 {
                continue;
            }
            let (px, py) = if quirks.flat_sprite_wrap {
                let index = (origin_x + column + (origin_y + row) * DISPLAY_WIDTH) % DISPLAY_PIXELS;
                (index % DISPLAY_WIDTH, index / DISPLAY_WIDTH)
            } else {
                (
                    (origin_x + column) % DISPLAY_WIDTH,
                    (origin_y + row) % DISPLAY_HEIGHT,
                )
            };
            let pixel = &mut state.frame_buffer[py][px];
            if *pixel == 1 {
                state.v[VF] = 0x1;
            }
            *pixel ^= 1;
        }
    }

    state.draw_flag = true;
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, x: usize) {
    let condition = state.is_key_pressed(state.v[x]);
    skip_if(state, condition);
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, x: usize) {
    let condition = !state.is_key_pressed(state.v[x]);
    skip_if(state, condition);
}

/// Vx = DT
pub fn moved(state: &mut State, x: usize) {
    state.v[x] = state.delay_timer;
}

/// Vx = first pressed key
/// Without a pressed key the pc is put back so the same instruction runs next cycle.
pub fn keyd(state: &mut State, x: usize) {
    match state.first_pressed_key() {
        Some(key) => state.v[x] = key,
        None => {
            trace!("waiting for a key press into V{:X}", x);
            state.pc = current_address(state);
        }
    }
}

/// DT = Vx
pub fn loads(state: &mut State, x: usize) {
    state.delay_timer = state.v[x];
}

/// ST = Vx
pub fn ld(state: &mut State, x: usize) {
    state.sound_timer = state.v[x];
}

/// I += Vx; VF = I overflowed 12 bits
pub fn addi(state: &mut State, x: usize) {
    let vx = u16::from(state.v[x]);
    let sum = u32::from(state.i) + u32::from(vx);
    state.i = state.i.wrapping_add(vx);
    state.v[VF] = (sum > 0xFFF) as u8;
}

/// I = Vx * 5
/// Set I to the memory address of the font glyph for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(state: &mut State, x: usize) {
    state.i = u16::from(state.v[x]) * FONT_GLYPH_BYTES;
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
pub fn bcd(state: &mut State, x: usize) {
    let vx = state.v[x];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    for (offset, digit) in digits.iter().enumerate() {
        state.write_byte(state.i.wrapping_add(offset as u16), *digit);
    }
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &mut State, x: usize) {
    for register in 0..=x {
        state.write_byte(state.i.wrapping_add(register as u16), state.v[register]);
    }
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut State, x: usize) {
    for register in 0..=x {
        state.v[register] = state.read_byte(state.i.wrapping_add(register as u16));
    }
}
