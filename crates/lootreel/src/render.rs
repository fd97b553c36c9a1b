use crate::geometry::{Point, Rect, ReelGeometry};
use crate::reel::{Reel, ReelEntry};
use crate::tier::TierTable;
use palette::{Srgb, Srgba, WithAlpha};

const FLASH_RGB: [u8; 3] = [0xFF, 0xD7, 0x00];
const CASE_OUTLINE_RGB: [u8; 3] = [0x4B, 0x69, 0xFF];

fn white() -> Srgba<f64> {
    Srgba::new(1.0, 1.0, 1.0, 1.0)
}

fn dim_overlay() -> Srgba<f64> {
    Srgba::new(0.0, 0.0, 0.0, 0.5)
}

fn case_fill() -> Srgba<f64> {
    Srgba::new(0.165, 0.165, 0.165, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Srgba<f64>,
    pub width: f64,
    pub dashed: bool,
}

impl Stroke {
    pub fn solid(color: Srgba<f64>, width: f64) -> Self {
        Self {
            color,
            width,
            dashed: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectStyle {
    pub fill: Option<Srgba<f64>>,
    pub outline: Option<Stroke>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f64,
    pub bold: bool,
}

/// The drawing sink. Coordinates are in reel viewport pixels; text is
/// centred on the given point.
pub trait Canvas {
    type Error;

    fn rect(&mut self, rect: Rect, style: RectStyle) -> Result<(), Self::Error>;

    fn line(&mut self, from: Point, to: Point, stroke: Stroke) -> Result<(), Self::Error>;

    fn text(
        &mut self,
        at: Point,
        text: &str,
        font: Font,
        color: Srgba<f64>,
    ) -> Result<(), Self::Error>;
}

/// How the reel is lit at the moment of drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageMode {
    Spinning,
    Stopped,
    Flash { lit: bool },
    Revealed,
}

impl StageMode {
    fn highlights_winner(&self) -> bool {
        !matches!(self, Self::Spinning)
    }
}

pub fn tier_rgba(color: Srgb<u8>) -> Srgba<f64> {
    color.into_format::<f64>().with_alpha(1.0)
}

struct CardRenderer<'a> {
    entry: &'a ReelEntry,
    rect: Rect,
    selected: bool,
    table: &'a TierTable,
}

impl CardRenderer<'_> {
    fn draw<C: Canvas>(&self, canvas: &mut C) -> Result<(), C::Error> {
        let color = tier_rgba(self.table.color(self.entry.tier));
        if self.selected {
            canvas.rect(
                self.rect,
                RectStyle {
                    fill: Some(color),
                    outline: Some(Stroke::solid(white(), 4.0)),
                },
            )?;
        } else {
            canvas.rect(
                self.rect,
                RectStyle {
                    fill: Some(color),
                    outline: Some(Stroke::solid(color, 2.0)),
                },
            )?;
            canvas.rect(
                self.rect,
                RectStyle {
                    fill: Some(dim_overlay()),
                    outline: None,
                },
            )?;
        }

        let center = self.rect.center();
        canvas.text(
            Point::new(center.x, center.y - 20.0),
            &self.entry.item.card_label(),
            Font {
                size: 11.0,
                bold: true,
            },
            white(),
        )?;
        canvas.text(
            Point::new(center.x, center.y + 20.0),
            &self.entry.tier.short_name(),
            Font {
                size: 10.0,
                bold: false,
            },
            white(),
        )
    }
}

/// Paints the reel at `offset`: centre line, visible cards, and the flash
/// overlay when lit.
pub fn draw_stage<C: Canvas>(
    canvas: &mut C,
    reel: &Reel,
    offset: f64,
    mode: StageMode,
    geometry: &ReelGeometry,
    table: &TierTable,
) -> Result<(), C::Error> {
    draw_center_line(canvas, mode, geometry)?;

    let winner = reel.winner_index();
    let mut indices: Vec<usize> = geometry.visible_range(offset, reel.len()).collect();
    if mode.highlights_winner() && !indices.contains(&winner) {
        indices.push(winner);
    }

    for i in indices {
        let rect = geometry.card_rect(i, offset);
        let selected = mode.highlights_winner() && i == winner;
        if !selected && !geometry.is_visible(&rect) {
            continue;
        }
        CardRenderer {
            entry: &reel.entries()[i],
            rect,
            selected,
            table,
        }
        .draw(canvas)?;
    }

    if mode == (StageMode::Flash { lit: true }) {
        let [r, g, b] = FLASH_RGB;
        canvas.rect(
            geometry.viewport(),
            RectStyle {
                fill: Some(tier_rgba(Srgb::new(r, g, b))),
                outline: None,
            },
        )?;
    }
    Ok(())
}

fn draw_center_line<C: Canvas>(
    canvas: &mut C,
    mode: StageMode,
    geometry: &ReelGeometry,
) -> Result<(), C::Error> {
    let stroke = match mode {
        StageMode::Spinning => Stroke {
            color: white(),
            width: 3.0,
            dashed: true,
        },
        _ => Stroke::solid(white(), 4.0),
    };
    canvas.line(
        Point::new(geometry.center_line_x, 20.0),
        Point::new(geometry.center_line_x, geometry.viewport_height - 20.0),
        stroke,
    )
}

/// The closed case shown before the first open.
pub fn draw_case<C: Canvas>(canvas: &mut C, geometry: &ReelGeometry) -> Result<(), C::Error> {
    let size = 160.0;
    let rect = Rect::new(
        geometry.center_line_x - size / 2.0,
        geometry.center_y - size / 2.0,
        size,
        size,
    );
    let [r, g, b] = CASE_OUTLINE_RGB;
    canvas.rect(
        rect,
        RectStyle {
            fill: Some(case_fill()),
            outline: Some(Stroke::solid(tier_rgba(Srgb::new(r, g, b)), 4.0)),
        },
    )?;
    let center = rect.center();
    canvas.text(
        Point::new(center.x, center.y + 50.0),
        "CASE",
        Font {
            size: 18.0,
            bold: true,
        },
        white(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assign::TierAssignment;
    use crate::item::Item;
    use crate::select::{CaseSelector, OpenResult};
    use crate::settings::ReelSettings;
    use crate::tier::{TIER_TABLE, Tier};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::convert::Infallible;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Rect(Rect, RectStyle),
        Line(Point, Point, Stroke),
        Text(Point, String),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Canvas for Recorder {
        type Error = Infallible;

        fn rect(&mut self, rect: Rect, style: RectStyle) -> Result<(), Infallible> {
            self.ops.push(Op::Rect(rect, style));
            Ok(())
        }

        fn line(&mut self, from: Point, to: Point, stroke: Stroke) -> Result<(), Infallible> {
            self.ops.push(Op::Line(from, to, stroke));
            Ok(())
        }

        fn text(
            &mut self,
            at: Point,
            text: &str,
            _: Font,
            _: Srgba<f64>,
        ) -> Result<(), Infallible> {
            self.ops.push(Op::Text(at, text.to_string()));
            Ok(())
        }
    }

    fn reel() -> Reel {
        let items: Vec<Item> = ["A", "B", "C"].into_iter().map(Item::from).collect();
        let assignment =
            TierAssignment::from_buckets([items.clone(), vec![], vec![], vec![], vec![]]);
        let selector = CaseSelector::new(&TIER_TABLE, &assignment, &items);
        let result = OpenResult::new(Item::from("Winner"), Tier::ExceedinglyRare);
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let settings = ReelSettings::default();
        Reel::build(&selector, &TIER_TABLE, &result, &settings, &mut rng)
    }

    fn draw(reel: &Reel, offset: f64, mode: StageMode) -> Vec<Op> {
        let mut canvas = Recorder::default();
        let geometry = ReelGeometry::default();
        draw_stage(&mut canvas, reel, offset, mode, &geometry, &TIER_TABLE).unwrap();
        canvas.ops
    }

    fn white_outlined(ops: &[Op]) -> Vec<Rect> {
        ops.iter()
            .filter_map(|op| match op {
                Op::Rect(rect, style) if style.outline.is_some_and(|s| s.color == white()) => {
                    Some(*rect)
                }
                _ => None,
            })
            .collect()
    }

    fn is_dim_overlay(op: &Op) -> bool {
        matches!(
            op,
            Op::Rect(_, style) if style.outline.is_none() && style.fill == Some(dim_overlay())
        )
    }

    #[test]
    fn test_stopped_reel_highlights_centered_winner() {
        let geometry = ReelGeometry::default();
        let reel = reel();
        let offset = geometry.target_offset(reel.winner_index());

        let ops = draw(&reel, offset, StageMode::Stopped);

        let highlighted = white_outlined(&ops);
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].center().x, geometry.center_line_x);
        assert!(ops.contains(&Op::Text(
            Point::new(geometry.center_line_x, geometry.center_y - 20.0),
            "Winner".to_string()
        )));
    }

    #[test]
    fn test_spinning_reel_is_dimmed_with_dashed_line() {
        let ops = draw(&reel(), 0.0, StageMode::Spinning);

        assert!(white_outlined(&ops).is_empty());
        assert!(matches!(ops[0], Op::Line(_, _, Stroke { dashed: true, .. })));
        assert!(ops.iter().any(is_dim_overlay));
    }

    #[test]
    fn test_flash_overlay_only_when_lit() {
        let geometry = ReelGeometry::default();
        let reel = reel();
        let offset = geometry.target_offset(reel.winner_index());
        let covers_viewport = |ops: &[Op]| {
            ops.iter()
                .any(|op| matches!(op, Op::Rect(r, _) if *r == geometry.viewport()))
        };

        assert!(covers_viewport(&draw(&reel, offset, StageMode::Flash { lit: true })));
        assert!(!covers_viewport(&draw(&reel, offset, StageMode::Flash { lit: false })));
        assert!(!covers_viewport(&draw(&reel, offset, StageMode::Revealed)));
    }

    #[test]
    fn test_draw_case() {
        let mut canvas = Recorder::default();
        draw_case(&mut canvas, &ReelGeometry::default()).unwrap();
        assert_eq!(canvas.ops.len(), 2);
        assert!(matches!(&canvas.ops[1], Op::Text(_, text) if text == "CASE"));
    }
}
