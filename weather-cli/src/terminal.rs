use std::{
    io::{self, Write},
    time::Duration,
};

use async_trait::async_trait;
use owo_colors::OwoColorize;
use weatherdash_core::{
    Board, Card, CardPhase, Renderer, board::CardView, config::DisplayConfig,
};

/// Draws cards as text blocks on stdout.
#[derive(Debug)]
pub struct TerminalRenderer {
    board: Board,
    fade_out: Duration,
    color: bool,
    expand_all: bool,
}

impl TerminalRenderer {
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            board: Board::new(),
            fade_out: display.fade_out(),
            color: display.color,
            expand_all: false,
        }
    }

    pub fn set_expand_all(&mut self, expand_all: bool) {
        self.expand_all = expand_all;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Print every card currently on the board.
    pub fn redraw(&self) {
        if self.board.is_empty() {
            println!("(no cards)");
        }
        for card in self.board.cards() {
            self.print(card);
        }
    }

    fn print(&self, card: &Card) {
        println!("{}", format_card(card, self.expand_all, self.color));
    }

    fn print_named(&self, name: &str) {
        if let Some(card) = self.board.get(name) {
            self.print(card);
        }
    }
}

#[async_trait]
impl Renderer for TerminalRenderer {
    fn render_card(&mut self, card: CardView) {
        let name = card.name.clone();
        self.board.push(card);
        self.print_named(&name);
    }

    async fn remove_card(&mut self, name: &str) {
        if !self.board.begin_removal(name) {
            return;
        }
        self.print_named(name);

        tokio::time::sleep(self.fade_out).await;

        self.board.finish_removal(name);
        println!("Removed {name}.");
    }

    fn toggle_expanded(&mut self, name: &str) -> Option<bool> {
        let expanded = self.board.toggle_expanded(name)?;
        self.print_named(name);
        Some(expanded)
    }

    fn set_loading(&mut self, loading: bool) {
        if loading {
            eprint!("Loading...");
        } else {
            eprint!("\r          \r");
        }
        let _ = io::stderr().flush();
    }

    fn notify(&mut self, message: &str) {
        if self.color {
            println!("{}", message.yellow().bold());
        } else {
            println!("{message}");
        }
    }

    fn clear(&mut self) {
        self.board.clear();
    }
}

/// Text block for one card.
pub fn format_card(card: &Card, expand_all: bool, color: bool) -> String {
    let view = &card.view;
    let mut lines = Vec::new();

    let title = if card.phase == CardPhase::Removing {
        format!("{} (removing)", view.name)
    } else {
        view.name.clone()
    };
    lines.push(if color { title.bold().to_string() } else { title });
    lines.push(format!("  {}", view.headline));
    lines.push(format!("  Condition: {}", view.condition));

    let aqi = format!("AQI: {}", view.aqi);
    lines.push(format!("  {}", if color { paint_aqi(&aqi, view.aqi_class) } else { aqi }));

    if card.expanded || expand_all {
        lines.push(format!("  Humidity: {}", view.humidity));
        lines.push(format!("  Wind: {}", view.wind));
    }
    lines.push(format!("  Last updated: {}", view.last_updated));

    let block = lines.join("\n");
    if color && card.phase == CardPhase::Removing {
        block.dimmed().to_string()
    } else {
        block
    }
}

fn paint_aqi(text: &str, class: &str) -> String {
    match class {
        "good" => text.green().to_string(),
        "moderate" => text.yellow().to_string(),
        "unhealthy" => text.red().to_string(),
        "hazardous" => text.magenta().to_string(),
        _ => text.to_string(),
    }
}
