use gnuplot::DashType;

pub const LINE_COLORS: [&str; 7] = [
    "red", "green", "blue", "black", "magenta", "yellow", "cyan",
];

pub const LINE_DASHES: [DashType; 4] = [
    DashType::Solid,
    DashType::Dash,
    DashType::Dot,
    DashType::DotDash,
];

#[derive(Clone, Copy)]
pub struct LineStyle {
    pub color: &'static str,
    pub dash: DashType,
}

/// Allocates line styles within one figure.
///
/// Owned by the caller and reset (or rebuilt) per figure, so two figures
/// always start from the same style and no cycling state leaks between them.
#[derive(Debug, Default)]
pub struct StyleCycle {
    counter: usize,
}

impl StyleCycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }

    pub fn next_style(&mut self) -> LineStyle {
        let i = self.counter;
        self.counter += 1;
        LineStyle {
            color: LINE_COLORS[i % LINE_COLORS.len()],
            dash: LINE_DASHES[i % LINE_DASHES.len()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_and_dashes_cycle_independently() {
        let mut cycle = StyleCycle::new();
        let styles: Vec<LineStyle> = (0..8).map(|_| cycle.next_style()).collect();
        assert_eq!(styles[0].color, "red");
        assert!(matches!(styles[0].dash, DashType::Solid));
        // dash wraps after four styles, color after seven
        assert_eq!(styles[4].color, "magenta");
        assert!(matches!(styles[4].dash, DashType::Solid));
        assert_eq!(styles[7].color, "red");
        assert!(matches!(styles[7].dash, DashType::DotDash));
    }

    #[test]
    fn reset_restarts_the_cycle() {
        let mut cycle = StyleCycle::new();
        cycle.next_style();
        cycle.next_style();
        cycle.reset();
        assert_eq!(cycle.next_style().color, "red");
    }
}
