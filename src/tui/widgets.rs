use crate::pomodoro::{Session, SessionDuration};
use crate::tui::animation;
use std::iter::once;
use tui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans, Text},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

/// A bordered block that lists key hints along its bottom edge.
pub struct BlockWithLegend<'a> {
    legend: Vec<Spans<'a>>,
    block: Block<'a>,
    border_type: BorderType,
}

impl<'a> BlockWithLegend<'a> {
    pub fn title<T>(mut self, title: T) -> BlockWithLegend<'a>
    where
        T: Into<Spans<'a>>,
    {
        self.block = self.block.title(title);
        self
    }

    pub fn borders(mut self, borders: Borders) -> BlockWithLegend<'a> {
        self.block = self.block.borders(borders);
        self
    }

    pub fn border_type(mut self, border_type: BorderType) -> BlockWithLegend<'a> {
        self.block = self.block.border_type(border_type);
        self.border_type = border_type;
        self
    }

    pub fn inner(&self, area: Rect) -> Rect {
        self.block.inner(area)
    }

    pub fn legend<T>(mut self, legend: Vec<T>) -> BlockWithLegend<'a>
    where
        T: Into<Spans<'a>>,
    {
        self.legend = legend.into_iter().map(|l| l.into()).collect();
        self
    }
}

impl<'a> Default for BlockWithLegend<'a> {
    fn default() -> BlockWithLegend<'a> {
        BlockWithLegend {
            legend: vec![],
            block: Block::default(),
            border_type: BorderType::Plain,
        }
    }
}

impl<'a> Widget for BlockWithLegend<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 2 || area.height < 1 {
            return;
        }
        self.block.render(area, buf);
        let symbols = BorderType::line_symbols(self.border_type);

        let legend_y = area.y + area.height - 1;
        let mut legend_x = area.x + 1;

        for entry in self.legend {
            let entry: Spans = once(Span::from(symbols.bottom_right))
                .chain(entry.0)
                .chain(once(Span::from(symbols.bottom_left)))
                .collect::<Vec<_>>()
                .into();

            let width_remaining = area.width.saturating_sub(legend_x - area.x + 1);
            let (x, _) = buf.set_spans(legend_x, legend_y, &entry, width_remaining);
            legend_x = x;
        }
    }
}

pub struct PomodoroClock<'a> {
    block: Option<BlockWithLegend<'a>>,
    time_remaining: SessionDuration,
    session: Session,
    is_paused: bool,
    progress_percentage: f64,
    work_duration: SessionDuration,
    break_duration: SessionDuration,
}

impl<'a> PomodoroClock<'a> {
    pub fn block(mut self, block: BlockWithLegend<'a>) -> PomodoroClock<'a> {
        self.block = Some(block);
        self
    }

    pub fn time_remaining(mut self, time_remaining: SessionDuration) -> PomodoroClock<'a> {
        self.time_remaining = time_remaining;
        self
    }

    pub fn session(mut self, session: Session) -> PomodoroClock<'a> {
        self.session = session;
        self
    }

    pub fn timer_is_paused(mut self, is_paused: bool) -> PomodoroClock<'a> {
        self.is_paused = is_paused;
        self
    }

    pub fn progress_percentage(mut self, progress_percentage: f64) -> PomodoroClock<'a> {
        self.progress_percentage = progress_percentage.clamp(0.0, 1.0);
        self
    }

    pub fn durations(
        mut self,
        work_duration: SessionDuration,
        break_duration: SessionDuration,
    ) -> PomodoroClock<'a> {
        self.work_duration = work_duration;
        self.break_duration = break_duration;
        self
    }

    fn session_style(&self) -> Style {
        let color = match self.session {
            Session::Work => Color::Blue,
            Session::Break => Color::Green,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }
}

impl<'a> Widget for PomodoroClock<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session_style = self.session_style();
        let inner_area = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        if let Some(block) = self.block {
            block.render(area, buf);
        }

        let clock_area = centered(inner_area, animation::CLOCK_WIDTH, animation::CLOCK_HEIGHT);

        Paragraph::new(animation::clock(1.0 - self.progress_percentage))
            .style(session_style)
            .alignment(Alignment::Left)
            .render(clock_area, buf);

        let status_icon = if self.is_paused { "⏵" } else { "⏸" };
        let status_text = Text::from(vec![
            Spans::from(Span::styled(
                self.time_remaining.to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Spans::from(vec![
                Span::styled(self.session.to_string(), session_style),
                Span::raw(" "),
                Span::raw(status_icon),
            ]),
            Spans::default(),
            Spans::from(format!("work  {}", self.work_duration)),
            Spans::from(format!("break {}", self.break_duration)),
        ]);

        let text_area = clock_area.inner(&Margin {
            horizontal: 1,
            vertical: 1,
        });
        let text_height = status_text.height() as u16;
        let top_padding = (text_area.height / 2).saturating_sub(text_height / 2);
        let text_area = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(top_padding), Constraint::Min(0)])
            .split(text_area)[1];

        Paragraph::new(status_text)
            .alignment(Alignment::Center)
            .render(text_area, buf);
    }
}

impl<'a> Default for PomodoroClock<'a> {
    fn default() -> PomodoroClock<'a> {
        PomodoroClock {
            block: None,
            time_remaining: SessionDuration::default(),
            session: Session::Work,
            is_paused: true,
            progress_percentage: 0.0,
            work_duration: SessionDuration::default(),
            break_duration: SessionDuration::default(),
        }
    }
}

const STEPS: [&str; 5] = [
    "1. Select a task to focus on.",
    "2. Set a timer for 25-30 min. of work.",
    "3. Take a 5 min. break after each work interval.",
    "4. Repeat for 4 rounds.",
    "5. Take a longer break (20-30 min.).",
];

/// Static explanation of the technique, drawn over whatever is below it.
#[derive(Default)]
pub struct InfoDialog<'a> {
    block: Option<BlockWithLegend<'a>>,
    link: &'a str,
}

impl<'a> InfoDialog<'a> {
    pub fn block(mut self, block: BlockWithLegend<'a>) -> InfoDialog<'a> {
        self.block = Some(block);
        self
    }

    pub fn link(mut self, link: &'a str) -> InfoDialog<'a> {
        self.link = link;
        self
    }
}

impl<'a> Widget for InfoDialog<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let inner_area = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        if let Some(block) = self.block {
            block.render(area, buf);
        }

        let bold = Style::default().add_modifier(Modifier::BOLD);
        let mut lines = vec![
            Spans::from(vec![
                Span::styled("The Pomodoro Technique", bold),
                Span::raw(
                    " is a time management method that uses a timer to break work \
                     into intervals called Pomodoros. The basic steps are:",
                ),
            ]),
            Spans::default(),
        ];
        lines.extend(STEPS.iter().map(|step| Spans::from(Span::styled(*step, bold))));
        lines.push(Spans::default());
        lines.push(Spans::from(vec![
            Span::raw("Read more: "),
            Span::styled(
                self.link,
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner_area.inner(&Margin { horizontal: 1, vertical: 0 }), buf);
    }
}

/// Largest `width` x `height` rect centered in `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
