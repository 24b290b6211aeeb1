//! Screens of the cosmos TUI.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Daily card and menu.
    Home,
    /// Chat with Órion.
    Oracle,
    Dreams,
    /// Guided breathing timer.
    Meditation,
    StarMap,
    /// Gratitude list and daily checklist.
    Rituals,
}

impl View {
    /// Returns the display name for this view.
    pub fn name(&self) -> &'static str {
        match self {
            View::Home => "Início",
            View::Oracle => "Oráculo",
            View::Dreams => "Sonhos",
            View::Meditation => "Respirar",
            View::StarMap => "Mapa Estelar",
            View::Rituals => "Rituais",
        }
    }

    /// One-line description shown in the Home menu.
    pub fn tagline(&self) -> &'static str {
        match self {
            View::Home => "",
            View::Oracle => "Converse com Órion, sua consciência cósmica",
            View::Dreams => "Decifre as mensagens do seu inconsciente",
            View::Meditation => "Sintonize sua respiração com o universo",
            View::StarMap => "Descubra o alinhamento dos astros para hoje",
            View::Rituals => "Gratidão e pequenos gestos diários",
        }
    }

    /// Get all views in tab order.
    pub fn all() -> &'static [View] {
        &[
            View::Home,
            View::Oracle,
            View::Dreams,
            View::Meditation,
            View::StarMap,
            View::Rituals,
        ]
    }

    /// Views reachable from the Home menu.
    pub fn destinations() -> &'static [View] {
        &View::all()[1..]
    }

    fn index(&self) -> usize {
        View::all().iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn next(&self) -> View {
        let views = View::all();
        views[(self.index() + 1) % views.len()]
    }

    pub fn prev(&self) -> View {
        let views = View::all();
        views[(self.index() + views.len() - 1) % views.len()]
    }

    /// Whether the screen takes free text, so `q` must not quit.
    pub fn accepts_text(&self) -> bool {
        matches!(
            self,
            View::Oracle | View::Dreams | View::StarMap | View::Rituals
        )
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_all_order() {
        let all = View::all();
        assert_eq!(all.len(), 6);
        assert_eq!(all[0], View::Home);
        assert_eq!(all[5], View::Rituals);
    }

    #[test]
    fn test_view_next_wraps() {
        assert_eq!(View::Home.next(), View::Oracle);
        assert_eq!(View::Rituals.next(), View::Home);
    }

    #[test]
    fn test_view_prev_wraps() {
        assert_eq!(View::Home.prev(), View::Rituals);
        assert_eq!(View::Oracle.prev(), View::Home);
    }

    #[test]
    fn test_destinations_exclude_home() {
        assert_eq!(View::destinations().len(), 5);
        assert!(!View::destinations().contains(&View::Home));
    }

    #[test]
    fn test_text_screens() {
        assert!(!View::Home.accepts_text());
        assert!(!View::Meditation.accepts_text());
        assert!(View::Dreams.accepts_text());
    }

    #[test]
    fn test_view_display() {
        assert_eq!(format!("{}", View::StarMap), "Mapa Estelar");
    }
}
