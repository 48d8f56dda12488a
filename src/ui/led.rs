//! Seven-segment rendering for the clock face.
//!
//! Each character becomes a fixed-width cell of block glyphs; digits light
//! the classic seven segments, the colon two dots.

const TOP: u8 = 1 << 0;
const TOP_LEFT: u8 = 1 << 1;
const TOP_RIGHT: u8 = 1 << 2;
const MIDDLE: u8 = 1 << 3;
const BOTTOM_LEFT: u8 = 1 << 4;
const BOTTOM_RIGHT: u8 = 1 << 5;
const BOTTOM: u8 = 1 << 6;

/// Rows every rendered line occupies.
pub const GLYPH_ROWS: usize = 7;

const DIGIT_WIDTH: usize = 6;
const COLON_WIDTH: usize = 3;
const GAP: usize = 2;

fn segments(c: char) -> u8 {
    match c {
        '0' => TOP | TOP_LEFT | TOP_RIGHT | BOTTOM_LEFT | BOTTOM_RIGHT | BOTTOM,
        '1' => TOP_RIGHT | BOTTOM_RIGHT,
        '2' => TOP | TOP_RIGHT | MIDDLE | BOTTOM_LEFT | BOTTOM,
        '3' => TOP | TOP_RIGHT | MIDDLE | BOTTOM_RIGHT | BOTTOM,
        '4' => TOP_LEFT | TOP_RIGHT | MIDDLE | BOTTOM_RIGHT,
        '5' => TOP | TOP_LEFT | MIDDLE | BOTTOM_RIGHT | BOTTOM,
        '6' => TOP | TOP_LEFT | MIDDLE | BOTTOM_LEFT | BOTTOM_RIGHT | BOTTOM,
        '7' => TOP | TOP_RIGHT | BOTTOM_RIGHT,
        '8' => TOP | TOP_LEFT | TOP_RIGHT | MIDDLE | BOTTOM_LEFT | BOTTOM_RIGHT | BOTTOM,
        // 9 is drawn closed, with its bottom segment lit.
        '9' => TOP | TOP_LEFT | TOP_RIGHT | MIDDLE | BOTTOM_RIGHT | BOTTOM,
        _ => 0,
    }
}

fn push_digit(rows: &mut [String], segs: u8) {
    for (index, row) in rows.iter_mut().enumerate() {
        let (horizontal, left, right) = match index {
            0 => (TOP, 0, 0),
            1 | 2 => (0, TOP_LEFT, TOP_RIGHT),
            3 => (MIDDLE, 0, 0),
            4 | 5 => (0, BOTTOM_LEFT, BOTTOM_RIGHT),
            _ => (BOTTOM, 0, 0),
        };

        if horizontal != 0 {
            let on = segs & horizontal != 0;
            row.push(' ');
            for _ in 0..DIGIT_WIDTH - 2 {
                row.push(if on { '█' } else { ' ' });
            }
            row.push(' ');
        } else {
            row.push(if segs & left != 0 { '█' } else { ' ' });
            for _ in 0..DIGIT_WIDTH - 2 {
                row.push(' ');
            }
            row.push(if segs & right != 0 { '█' } else { ' ' });
        }
    }
}

fn push_colon(rows: &mut [String]) {
    for (index, row) in rows.iter_mut().enumerate() {
        let dot = index == 2 || index == 4;
        row.push(' ');
        row.push(if dot { '█' } else { ' ' });
        for _ in 0..COLON_WIDTH - 2 {
            row.push(' ');
        }
    }
}

/// Render a time string such as `2:05` into `GLYPH_ROWS` equally wide
/// lines of block characters. Unknown characters render as blank digits.
pub fn render_lines(text: &str) -> Vec<String> {
    let mut rows = vec![String::new(); GLYPH_ROWS];
    let mut first = true;
    for c in text.chars() {
        if !first {
            for row in rows.iter_mut() {
                for _ in 0..GAP {
                    row.push(' ');
                }
            }
        }
        first = false;

        if c == ':' {
            push_colon(&mut rows);
        } else {
            push_digit(&mut rows, segments(c));
        }
    }
    rows
}

/// Width in terminal cells of a rendered string.
pub fn rendered_width(text: &str) -> usize {
    render_lines(text)
        .first()
        .map(|row| row.chars().count())
        .unwrap_or(0)
}
