//! Layout and widgets for each screen.

use super::app::{
    CosmosApp, DreamState, HomeState, MeditationState, OracleState, RitualsState, Screen,
    StarField, StarMapState,
};
use super::views::View;
use crate::gateway::Role;
use crate::rituals::{RitualTask, GRATITUDE_SLOTS};
use crate::timer::Phase;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

const ACCENT: Color = Color::Magenta;
const MUTED: Color = Color::DarkGray;

const TASK_GLYPHS: [(RitualTask, &str); 4] = [
    (RitualTask::Hydration, "💧"),
    (RitualTask::Silence, "☀"),
    (RitualTask::Nature, "🌿"),
    (RitualTask::Kindness, "♥"),
];

fn task_glyph(task: RitualTask) -> &'static str {
    TASK_GLYPHS
        .iter()
        .find(|(t, _)| *t == task)
        .map(|(_, glyph)| *glyph)
        .unwrap_or("•")
}

fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Inhale => Color::Cyan,
        Phase::Hold => Color::Magenta,
        Phase::Exhale => Color::Blue,
    }
}

/// Render the whole frame: tabs, degraded banner, screen, footer.
pub fn render(frame: &mut Frame, app: &CosmosApp) {
    let banner_height = if app.is_available() { 0 } else { 1 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_tabs(frame, chunks[0], app.current_view());
    if !app.is_available() {
        let banner = Paragraph::new(
            " ⚠ Sem API Key: Órion está offline. Configure com `cosmos config set api_key <KEY>`.",
        )
        .style(Style::default().fg(Color::Black).bg(Color::Yellow));
        frame.render_widget(banner, chunks[1]);
    }

    let area = chunks[2];
    match app.screen() {
        Screen::Home(s) => render_home(frame, area, s),
        Screen::Oracle(s) => render_oracle(frame, area, s),
        Screen::Dreams(s) => render_dreams(frame, area, s),
        Screen::Meditation(s) => render_meditation(frame, area, s),
        Screen::StarMap(s) => render_star_map(frame, area, s),
        Screen::Rituals(s) => render_rituals(frame, area, s),
    }

    render_footer(frame, chunks[3], app.current_view());
}

fn render_tabs(frame: &mut Frame, area: Rect, current: View) {
    let titles: Vec<Line> = View::all().iter().map(|v| Line::from(v.name())).collect();
    let selected = View::all().iter().position(|v| *v == current).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" ✦ Tô no Cosmos "),
        )
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

fn render_footer(frame: &mut Frame, area: Rect, view: View) {
    let help = match view {
        View::Home => " ↑↓: escolher | Enter/1-5: abrir | Tab: próxima | Q/Esc: sair ",
        View::Oracle => " Enter: enviar | Tab: próxima | Esc: início | Ctrl+C: sair ",
        View::Dreams => " Enter: interpretar | Ctrl+R: outro sonho | Esc: início ",
        View::Meditation => " Espaço: iniciar/pausar | R: reiniciar | ←→: duração | Esc: início ",
        View::StarMap => " Tab: trocar campo | Enter: revelar | Ctrl+R: novo alinhamento | Esc: início ",
        View::Rituals => " ↑↓: escolher | digite: gratidão | Enter/Espaço: marcar | Esc: início ",
    };
    frame.render_widget(Paragraph::new(help).style(Style::default().fg(MUTED)), area);
}

fn titled(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).title(title)
}

fn render_home(frame: &mut Frame, area: Rect, s: &HomeState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(area);

    let card: Vec<Line> = match &s.wisdom {
        None => vec![Line::from(Span::styled(
            "Lendo as estrelas...",
            Style::default().fg(MUTED),
        ))],
        Some(w) => vec![
            Line::from(Span::styled(
                format!("\u{201c}{}\u{201d}", w.quote),
                Style::default().fg(Color::White).add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(
                format!("— {}", w.author),
                Style::default().fg(MUTED),
            )),
            Line::from(""),
            Line::from(Span::styled(w.insight.as_str(), Style::default().fg(Color::Cyan))),
        ],
    };
    frame.render_widget(
        Paragraph::new(card)
            .wrap(Wrap { trim: true })
            .block(titled(" Mensagem do Dia ")),
        chunks[0],
    );

    let items: Vec<ListItem> = View::destinations()
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let style = if i == s.selected {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {}. {:<14}", i + 1, view.name()), style),
                Span::styled(view.tagline(), Style::default().fg(MUTED)),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items).block(titled(" Explorar ")), chunks[1]);
}

/// Rows a text occupies when wrapped at `width` columns.
fn wrapped_height(text: &str, width: usize) -> usize {
    let width = width.max(1);
    text.lines()
        .map(|l| l.chars().count().max(1).div_ceil(width))
        .sum::<usize>()
        .max(1)
}

fn render_oracle(frame: &mut Frame, area: Rect, s: &OracleState) {
    let Some(session) = &s.session else {
        let msg = Paragraph::new("Órion precisa de uma API Key para conversar. ✨")
            .style(Style::default().fg(MUTED))
            .alignment(Alignment::Center)
            .block(titled(" Oráculo "));
        frame.render_widget(msg, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    for message in session.messages() {
        let (who, color) = match message.role {
            Role::User => ("Você", Color::White),
            Role::Model => ("Órion", ACCENT),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", message.timestamp.format("%H:%M")),
                Style::default().fg(MUTED),
            ),
            Span::styled(format!("{}: ", who), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw(message.text.as_str()),
        ]));
    }
    if s.waiting {
        lines.push(Line::from(Span::styled(
            "Sintonizando frequências...",
            Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
        )));
    }

    let inner_width = chunks[0].width.saturating_sub(2) as usize;
    let inner_height = chunks[0].height.saturating_sub(2) as usize;
    let total: usize = session
        .messages()
        .iter()
        .map(|m| wrapped_height(&format!("00:00 Órion: {}", m.text), inner_width))
        .sum::<usize>()
        + usize::from(s.waiting);
    let scroll = u16::try_from(total.saturating_sub(inner_height)).unwrap_or(u16::MAX);

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .block(titled(" Oráculo ")),
        chunks[0],
    );

    let input_style = if s.waiting {
        Style::default().fg(MUTED)
    } else {
        Style::default().fg(Color::White)
    };
    frame.render_widget(
        Paragraph::new(format!("> {}", s.input.value()))
            .style(input_style)
            .block(titled(" Pergunte ao cosmos... ")),
        chunks[1],
    );
}

fn render_dreams(frame: &mut Frame, area: Rect, s: &DreamState) {
    if let Some(reading) = &s.result {
        let mut lines = vec![
            Line::from(Span::styled("Resumo", Style::default().add_modifier(Modifier::BOLD))),
            Line::from(reading.summary.as_str()),
            Line::from(""),
            Line::from(Span::styled("Símbolos", Style::default().add_modifier(Modifier::BOLD))),
        ];
        for symbol in &reading.symbols {
            lines.push(Line::from(vec![
                Span::styled(format!("✦ {}: ", symbol.name), Style::default().fg(Color::Yellow)),
                Span::raw(symbol.meaning.as_str()),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Conselho de Órion",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            reading.guidance.as_str(),
            Style::default().fg(Color::Cyan),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Ctrl+R: outro sonho",
            Style::default().fg(MUTED),
        )));
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(titled(" Interpretação ")),
            area,
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(area);

    let prompt = if s.input.value().is_empty() {
        Span::styled("Eu estava voando sobre um oceano...", Style::default().fg(MUTED))
    } else {
        Span::raw(s.input.value())
    };
    frame.render_widget(
        Paragraph::new(Line::from(prompt))
            .wrap(Wrap { trim: false })
            .block(titled(" Descreva seu sonho ")),
        chunks[0],
    );

    let status = if s.loading {
        Span::styled("Órion está interpretando...", Style::default().fg(ACCENT))
    } else if let Some(err) = &s.error {
        Span::styled(err.as_str(), Style::default().fg(Color::Red))
    } else {
        Span::styled("Enter: interpretar", Style::default().fg(MUTED))
    };
    frame.render_widget(Paragraph::new(Line::from(status)), chunks[1]);
}

fn render_meditation(frame: &mut Frame, area: Rect, s: &MeditationState) {
    let timer = &s.timer;
    let phase = timer.phase();
    let lengths: Vec<Span> = crate::timer::SessionLength::all()
        .iter()
        .map(|len| {
            let style = if *len == timer.length() {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED)
            };
            Span::styled(format!(" {} min ", len.minutes()), style)
        })
        .collect();

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            timer.clock(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            timer.instruction(),
            Style::default().fg(phase_color(phase)),
        )),
        Line::from(Span::styled(
            if timer.is_running() { phase.label() } else { "" },
            Style::default().fg(MUTED),
        )),
        Line::from(""),
        Line::from(lengths),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(titled(" Respiração Cósmica ")),
        area,
    );
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    };
    titled(title).border_style(style)
}

fn render_star_map(frame: &mut Frame, area: Rect, s: &StarMapState) {
    if let Some(reading) = &s.result {
        let label = Style::default().fg(MUTED);
        let lines = vec![
            Line::from(vec![
                Span::styled("Sol em      ", label),
                Span::styled(reading.sun_sign.as_str(), Style::default().fg(Color::Yellow)),
            ]),
            Line::from(vec![
                Span::styled("Ascendente  ", label),
                Span::styled(reading.rising_sign.as_str(), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                reading.daily_prediction.as_str(),
                Style::default().fg(Color::White),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Cor de poder     ", label),
                Span::raw(reading.power_color.as_str()),
            ]),
            Line::from(vec![
                Span::styled("Número da sorte  ", label),
                Span::raw(reading.lucky_number.as_str()),
            ]),
            Line::from(""),
            Line::from(Span::styled("Ctrl+R: novo alinhamento", label)),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(titled(" Mapa de Hoje ")),
            area,
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let placeholder = |value: &str, hint: &'static str| {
        if value.is_empty() {
            Span::styled(hint, Style::default().fg(MUTED))
        } else {
            Span::raw(value.to_string())
        }
    };
    frame.render_widget(
        Paragraph::new(Line::from(placeholder(&s.date, "DD/MM/AAAA")))
            .block(field_block(" Data de nascimento ", s.focus == StarField::Date)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(placeholder(&s.time, "HH:MM")))
            .block(field_block(" Hora de nascimento ", s.focus == StarField::Time)),
        chunks[1],
    );

    let status = if s.loading {
        Span::styled("Consultando os astros...", Style::default().fg(ACCENT))
    } else if let Some(err) = &s.error {
        Span::styled(err.as_str(), Style::default().fg(Color::Red))
    } else {
        Span::styled("Enter: revelar meu mapa", Style::default().fg(MUTED))
    };
    frame.render_widget(
        Paragraph::new(Line::from(status)).wrap(Wrap { trim: true }),
        chunks[2],
    );
}

fn render_rituals(frame: &mut Frame, area: Rect, s: &RitualsState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(GRATITUDE_SLOTS as u16 + 2),
            Constraint::Min(0),
        ])
        .split(area);

    let progress = s.state.progress();
    let label = if s.state.is_complete() {
        format!("Sincronização: {}% · Alinhamento Completo ✨", progress)
    } else {
        format!("Sincronização: {}%", progress)
    };
    let gauge = Gauge::default()
        .block(titled(" Rituais Diários "))
        .gauge_style(
            Style::default()
                .fg(Color::Green)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .percent(u16::from(progress))
        .label(Span::styled(label, Style::default().fg(Color::White)));
    frame.render_widget(gauge, chunks[0]);

    let selected_style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);

    let gratitude: Vec<ListItem> = s
        .state
        .gratitude_list
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let cursor = if i == s.selected { "▸" } else { " " };
            let text = if entry.is_empty() {
                Span::styled("Sou grato(a) por...", Style::default().fg(MUTED))
            } else {
                Span::raw(entry.as_str())
            };
            let style = if i == s.selected {
                selected_style
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} {}. ", cursor, i + 1), style),
                text,
            ]))
        })
        .collect();
    frame.render_widget(List::new(gratitude).block(titled(" Gratidão ")), chunks[1]);

    let tasks: Vec<ListItem> = RitualTask::all()
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let row = GRATITUDE_SLOTS + i;
            let done = s.state.is_completed(*task);
            let cursor = if row == s.selected { "▸" } else { " " };
            let check = if done { "[✓]" } else { "[ ]" };
            let style = if row == s.selected {
                selected_style
            } else if done {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(
                format!("{} {} {} {}", cursor, check, task_glyph(*task), task.label()),
                style,
            )))
        })
        .collect();
    let title = match &s.save_error {
        Some(_) => " Rituais (não foi possível salvar) ",
        None => " Rituais ",
    };
    frame.render_widget(List::new(tasks).block(titled(title)), chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_task_has_a_glyph() {
        for task in RitualTask::all() {
            assert_ne!(task_glyph(*task), "•");
        }
    }

    #[test]
    fn test_wrapped_height() {
        assert_eq!(wrapped_height("", 10), 1);
        assert_eq!(wrapped_height("abcde", 10), 1);
        assert_eq!(wrapped_height("abcdefghijk", 10), 2);
        assert_eq!(wrapped_height("a\nb", 10), 2);
        assert_eq!(wrapped_height("abc", 0), 3);
    }
}
