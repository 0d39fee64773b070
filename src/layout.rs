use rand::seq::SliceRandom;
use rand::Rng;

/// Row sizes of the three letter rows (qwerty top/home/bottom).
pub const ROW_SIZES: [usize; 3] = [10, 9, 7];

const QWERTY_ROWS: [&[char]; 3] = [
    &['Q', 'W', 'E', 'R', 'T', 'Y', 'U', 'I', 'O', 'P'],
    &['A', 'S', 'D', 'F', 'G', 'H', 'J', 'K', 'L'],
    &['Z', 'X', 'C', 'V', 'B', 'N', 'M'],
];

/// An arrangement of the 26 letters across three fixed-size rows.
///
/// Scrambling only permutes positions; the multiset of keys is always
/// exactly the Latin alphabet, uppercase.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyLayout {
    rows: [Vec<char>; 3],
}

impl KeyLayout {
    /// The canonical unscrambled arrangement. Physical key positions are
    /// always interpreted against this layout.
    pub fn qwerty() -> Self {
        Self {
            rows: [
                QWERTY_ROWS[0].to_vec(),
                QWERTY_ROWS[1].to_vec(),
                QWERTY_ROWS[2].to_vec(),
            ],
        }
    }

    pub fn rows(&self) -> &[Vec<char>; 3] {
        &self.rows
    }

    /// Uniform random permutation of all 26 keys: Fisher-Yates over the
    /// concatenated rows, re-sliced at the 10/9/7 boundaries. Pure with
    /// respect to `self`; the caller owns undo-stack bookkeeping.
    pub fn scrambled<R: Rng>(&self, rng: &mut R) -> Self {
        let mut keys: Vec<char> = self.rows.iter().flatten().copied().collect();
        keys.shuffle(rng);

        let row3 = keys.split_off(ROW_SIZES[0] + ROW_SIZES[1]);
        let row2 = keys.split_off(ROW_SIZES[0]);
        Self {
            rows: [keys, row2, row3],
        }
    }

    /// (row, index) of a key in this layout, or None for anything that is
    /// not one of the 26 letters.
    pub fn position_of(&self, key: char) -> Option<(usize, usize)> {
        let key = key.to_ascii_uppercase();
        for (row, keys) in self.rows.iter().enumerate() {
            if let Some(index) = keys.iter().position(|&k| k == key) {
                return Some((row, index));
            }
        }
        None
    }

    pub fn key_at(&self, row: usize, index: usize) -> char {
        self.rows[row][index]
    }
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self::qwerty()
    }
}

/// Translate a physical key press into the character the scrambled layout
/// displays at that position.
///
/// The physical key is located on the fixed qwerty layout ("where the
/// finger is"), then the same coordinate is read from `layout` ("what the
/// key cap says now"). Non-letter keys pass through unchanged. The shift
/// flag only selects the case of the result.
pub fn map_physical_to_virtual(physical: char, layout: &KeyLayout, shift: bool) -> char {
    let reference = KeyLayout::qwerty();
    let Some((row, index)) = reference.position_of(physical) else {
        return physical;
    };

    let virtual_key = layout.key_at(row, index);
    if shift {
        virtual_key.to_ascii_uppercase()
    } else {
        virtual_key.to_ascii_lowercase()
    }
}

/// Reverse lookup for the keyboard highlight: which physical key currently
/// carries `wanted` in the scrambled layout. None for non-letters.
pub fn physical_key_for(wanted: char, layout: &KeyLayout) -> Option<char> {
    let (row, index) = layout.position_of(wanted)?;
    Some(KeyLayout::qwerty().key_at(row, index))
}
