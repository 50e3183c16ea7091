use super::{Dimensions, Placement};
use crate::error::{Error, Result};

/// Repeat an overlay of size `tile` across `canvas`, row by row from the origin.
///
/// Every placement keeps the full overlay size; the last row and column may hang
/// over the right and bottom edges, which the compositor clips.
pub fn plan_tiles<O: Copy>(
    overlay: O,
    canvas: Dimensions,
    tile: Dimensions,
) -> Result<Vec<Placement<O>>> {
    if canvas.is_empty() || tile.is_empty() {
        return Err(Error::InvalidDimensions { canvas, tile });
    }

    let columns = canvas.width.div_ceil(tile.width) as usize;
    let rows = canvas.height.div_ceil(tile.height) as usize;
    let mut placements = Vec::with_capacity(columns * rows);

    for top in (0..canvas.height).step_by(tile.height as usize) {
        for left in (0..canvas.width).step_by(tile.width as usize) {
            placements.push(Placement::new(overlay, left as i64, top as i64));
        }
    }

    Ok(placements)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offsets(canvas: (u32, u32), tile: (u32, u32)) -> Vec<(i64, i64)> {
        plan_tiles((), Dimensions::new(canvas.0, canvas.1), Dimensions::new(tile.0, tile.1))
            .unwrap()
            .into_iter()
            .map(|p| (p.left, p.top))
            .collect()
    }

    #[test]
    fn exact_fit_is_single_placement() {
        assert_eq!(offsets((64, 48), (64, 48)), vec![(0, 0)]);
    }

    #[test]
    fn overflow_adds_a_column() {
        let w = 40;
        assert_eq!(offsets((2 * w - 1, 10), (w, 10)), vec![(0, 0), (w as i64, 0)]);
    }

    #[test]
    fn three_by_three_grid() {
        let placed = offsets((300, 300), (100, 100));
        let mut expected = Vec::new();
        for top in [0, 100, 200] {
            for left in [0, 100, 200] {
                expected.push((left, top));
            }
        }
        assert_eq!(placed, expected);
    }

    #[test]
    fn zero_sides_are_rejected() {
        for (canvas, tile) in [
            ((0, 10), (5, 5)),
            ((10, 0), (5, 5)),
            ((10, 10), (0, 5)),
            ((10, 10), (5, 0)),
        ] {
            let result = plan_tiles(
                (),
                Dimensions::new(canvas.0, canvas.1),
                Dimensions::new(tile.0, tile.1),
            );
            assert!(matches!(result, Err(Error::InvalidDimensions { .. })));
        }
    }

    #[test]
    fn covers_canvas_and_stays_inside() {
        for (cw, ch) in [(1, 1), (7, 3), (10, 10), (33, 17)] {
            for (tw, th) in [(1, 1), (2, 5), (3, 3), (10, 10), (40, 2)] {
                let placed = offsets((cw, ch), (tw, th));
                let mut covered = vec![false; (cw * ch) as usize];
                for &(left, top) in &placed {
                    assert!(left >= 0 && left < cw as i64);
                    assert!(top >= 0 && top < ch as i64);
                    for y in top..(top + th as i64).min(ch as i64) {
                        for x in left..(left + tw as i64).min(cw as i64) {
                            covered[(y * cw as i64 + x) as usize] = true;
                        }
                    }
                }
                assert!(
                    covered.iter().all(|&c| c),
                    "gap in {}x{} canvas with {}x{} tiles",
                    cw,
                    ch,
                    tw,
                    th
                );
            }
        }
    }

    #[test]
    fn repeated_calls_agree() {
        let first = offsets((123, 45), (10, 7));
        let second = offsets((123, 45), (10, 7));
        assert_eq!(first, second);
        assert_eq!(first.len(), 13 * 7);
    }
}
