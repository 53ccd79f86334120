/// Behaviours that differ between historical interpreters.
///
/// The default is the conventional behaviour; each flag switches to the
/// variant some ROMs were written against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Quirks {
    /// `8XY6`/`8XYE` shift `Vy` and store the result in `Vx` instead of shifting `Vx` in place
    pub shift_reads_vy: bool,
    /// Sprite pixels wrap with one modulo over the whole frame buffer instead of per axis,
    /// so a sprite leaving the right edge continues on the next row
    pub flat_sprite_wrap: bool,
}
