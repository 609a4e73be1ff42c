//! Splash screen rendering with ASCII art logo

use crate::state::{SplashPhase, SplashState};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Glyph rows of each letter of LABYRINTH
const GLYPHS: [[&str; 5]; 9] = [
    [r" _     ", r"| |    ", r"| |    ", r"| |___ ", r"|_____|"],
    [r"    _    ", r"   / \   ", r"  / _ \  ", r" / ___ \ ", r"/_/   \_\"],
    [r" ____  ", r"| __ ) ", r"|  _ \ ", r"| |_) |", r"|____/ "],
    [r"__   __", r"\ \ / /", r" \ V / ", r"  | |  ", r"  |_|  "],
    [r" ____  ", r"|  _ \ ", r"| |_) |", r"|  _ < ", r"|_| \_\"],
    [r" ___ ", r"|_ _|", r" | | ", r" | | ", r"|___|"],
    [r" _   _ ", r"| \ | |", r"|  \| |", r"| |\  |", r"|_| \_|"],
    [r" _____ ", r"|_   _|", r"  | |  ", r"  | |  ", r"  |_|  "],
    [r" _   _ ", r"| | | |", r"| |_| |", r"|  _  |", r"|_| |_|"],
];

/// Gold of the logo at full opacity
const GOLD: (u8, u8, u8) = (218, 165, 32);

/// Scale a color towards black as the splash fades
fn faded(rgb: (u8, u8, u8), fade: f32) -> Color {
    let keep = (1.0 - fade).clamp(0.0, 1.0);
    let scale = |c: u8| (f32::from(c) * keep).round() as u8;
    Color::Rgb(scale(rgb.0), scale(rgb.1), scale(rgb.2))
}

/// Build the LABYRINTH banner rows
fn build_logo() -> Vec<String> {
    (0..5)
        .map(|row| GLYPHS.iter().map(|glyph| glyph[row]).collect())
        .collect()
}

/// Draw the splash screen
pub fn draw(frame: &mut Frame, area: Rect, splash_state: &SplashState) {
    let fade = splash_state.fade;
    let logo_style = Style::default()
        .fg(faded(GOLD, fade))
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(faded((200, 200, 200), fade));

    let mut lines: Vec<Line> = build_logo()
        .into_iter()
        .map(|row| Line::from(Span::styled(row, logo_style)))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("The Labyrinth Awaits", text_style)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Entering the Labyrinth{:<3}", ".".repeat(splash_state.dots)),
        Style::default().fg(faded((128, 128, 128), fade)),
    )));

    let height = (lines.len() as u16).min(area.height);
    let logo_area = Rect {
        x: area.x,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width: area.width,
        height,
    };
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        logo_area,
    );

    // Skip hint only while the logo is fully shown
    if splash_state.phase == SplashPhase::Display && area.height > 2 {
        let hint = "Press any key to skip";
        let hint_area = Rect {
            x: area.x,
            y: area.y + area.height - 2,
            width: area.width,
            height: 1,
        };
        let hint_line = Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)));
        frame.render_widget(
            Paragraph::new(hint_line).alignment(Alignment::Center),
            hint_area,
        );
    }
}
