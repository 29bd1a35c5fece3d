//! Panel bodies.
//!
//! Each panel renders into the off-screen canvas buffer at its planned
//! rectangle. Content is clipped by the paragraph widgets, never wrapped, so
//! panel heights stay what the layout planned.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::data::{DashboardData, RiskLevel, Severity};
use super::layout::{Panel, stat_cards_per_row};
use crate::ui::theme::{Theme, theme_helpers as th};

pub fn render_panel(panel: Panel, data: &DashboardData, theme: &dyn Theme, area: Rect, buf: &mut Buffer) {
    let block = th::block(theme, Some(panel.title()), false);
    let inner = block.inner(area);
    block.render(area, buf);

    match panel {
        Panel::StatsOverview => render_stats(data, theme, inner, buf),
        _ => {
            let lines = panel_lines(panel, data, theme);
            Paragraph::new(lines).render(inner, buf);
        }
    }
}

fn panel_lines<'a>(panel: Panel, data: &'a DashboardData, theme: &dyn Theme) -> Vec<Line<'a>> {
    match panel {
        Panel::QuickActions => quick_action_lines(data, theme),
        Panel::StatsOverview => Vec::new(),
        Panel::AlertsPanel => alert_lines(data, theme),
        Panel::AtRiskLearners => at_risk_lines(data, theme),
        Panel::DeadlinesWidget => deadline_lines(data, theme),
        Panel::ScheduleWidget => schedule_lines(data, theme),
        Panel::BatchOverview => batch_lines(data, theme),
        Panel::AiInsights => insight_lines(data, theme),
        Panel::LearnerList => learner_lines(data, theme),
        Panel::SupportSection => support_lines(data, theme),
    }
}

fn quick_action_lines<'a>(data: &'a DashboardData, theme: &dyn Theme) -> Vec<Line<'a>> {
    let mut spans = Vec::new();
    for (index, action) in data.quick_actions.iter().enumerate() {
        let style = if index == 0 {
            th::button_primary_style(theme, true)
        } else {
            th::button_secondary_style(theme, true).add_modifier(Modifier::BOLD)
        };
        spans.push(Span::styled(format!(" {action} "), style));
        spans.push(Span::raw("  "));
    }
    vec![Line::from(spans)]
}

fn render_stats(data: &DashboardData, theme: &dyn Theme, area: Rect, buf: &mut Buffer) {
    let per_row = stat_cards_per_row(data.stats.len(), area.width);
    for (row_index, chunk) in data.stats.chunks(per_row).enumerate() {
        let y = area.y + (row_index as u16) * 3;
        if y >= area.bottom() {
            break;
        }
        let band = Rect::new(area.x, y, area.width, 3.min(area.bottom() - y));
        let cells = Layout::horizontal(vec![Constraint::Ratio(1, per_row as u32); per_row]).split(band);
        for (stat, cell) in chunk.iter().zip(cells.iter()) {
            let trend = match stat.trend {
                Some(value) => Span::styled(format!("▲ {value}%"), theme.status_success()),
                None => Span::styled("·", theme.text_muted_style()),
            };
            let lines = vec![
                Line::from(Span::styled(stat.title, theme.text_muted_style())),
                Line::from(Span::styled(stat.value.clone(), theme.accent_emphasis_style())),
                Line::from(trend),
            ];
            Paragraph::new(lines).render(*cell, buf);
        }
    }
}

fn severity_style(theme: &dyn Theme, severity: Severity) -> Style {
    match severity {
        Severity::Critical => theme.status_error(),
        Severity::Warning => theme.status_warning(),
        Severity::Info => theme.status_info(),
    }
}

fn alert_lines<'a>(data: &'a DashboardData, theme: &dyn Theme) -> Vec<Line<'a>> {
    data.alerts
        .iter()
        .map(|alert| {
            Line::from(vec![
                Span::styled("● ", severity_style(theme, alert.severity)),
                Span::styled(alert.message, theme.text_primary_style()),
                Span::styled(format!("  {}", alert.age), theme.text_muted_style()),
            ])
        })
        .collect()
}

fn risk_style(theme: &dyn Theme, risk: RiskLevel) -> Style {
    match risk {
        RiskLevel::Critical => theme.status_error().add_modifier(Modifier::BOLD),
        RiskLevel::High => theme.status_error(),
        RiskLevel::Medium => theme.status_warning(),
        RiskLevel::Low => theme.status_success(),
    }
}

fn at_risk_lines<'a>(data: &'a DashboardData, theme: &dyn Theme) -> Vec<Line<'a>> {
    data.at_risk_learners()
        .flat_map(|learner| {
            [
                Line::from(vec![
                    Span::styled(learner.name, theme.text_primary_style().add_modifier(Modifier::BOLD)),
                    Span::raw("  "),
                    Span::styled(learner.risk.label(), risk_style(theme, learner.risk)),
                ]),
                Line::from(Span::styled(
                    format!("  {}% complete · active {}", learner.progress, learner.last_active),
                    theme.text_muted_style(),
                )),
            ]
        })
        .collect()
}

fn deadline_lines<'a>(data: &'a DashboardData, theme: &dyn Theme) -> Vec<Line<'a>> {
    data.deadlines
        .iter()
        .map(|deadline| {
            let badge_style = if deadline.is_urgent() {
                theme.status_error().add_modifier(Modifier::BOLD)
            } else {
                theme.text_muted_style()
            };
            Line::from(vec![
                Span::styled(format!("{:>3}d ", deadline.due_in_days), badge_style),
                Span::styled(deadline.title, theme.text_primary_style()),
            ])
        })
        .collect()
}

fn schedule_lines<'a>(data: &'a DashboardData, theme: &dyn Theme) -> Vec<Line<'a>> {
    data.sessions
        .iter()
        .flat_map(|session| {
            [
                Line::from(vec![
                    Span::styled(format!("{}–{} ", session.start, session.end), theme.accent_primary_style()),
                    Span::styled(session.title, theme.text_primary_style()),
                ]),
                Line::from(Span::styled(
                    format!("  {} · with {}", session.kind.label(), session.trainer),
                    theme.text_muted_style(),
                )),
            ]
        })
        .collect()
}

fn batch_lines<'a>(data: &'a DashboardData, theme: &dyn Theme) -> Vec<Line<'a>> {
    data.batches
        .iter()
        .flat_map(|batch| {
            let mut progress = vec![Span::raw("  ")];
            progress.extend(th::progress_bar(theme, batch.completion, 16));
            progress.push(Span::styled(
                format!(" {}% · engagement {}%", batch.completion, batch.engagement),
                theme.text_muted_style(),
            ));
            [
                Line::from(vec![
                    Span::styled(batch.name, theme.text_primary_style().add_modifier(Modifier::BOLD)),
                    Span::styled(format!("  {} learners", batch.learners), theme.text_muted_style()),
                ]),
                Line::from(progress),
            ]
        })
        .collect()
}

fn insight_lines<'a>(data: &'a DashboardData, theme: &dyn Theme) -> Vec<Line<'a>> {
    data.insights
        .iter()
        .flat_map(|insight| {
            [
                Line::from(vec![
                    Span::styled("✦ ", theme.accent_primary_style()),
                    Span::styled(insight.headline, theme.text_primary_style()),
                ]),
                Line::from(Span::styled(format!("  → {}", insight.action), theme.status_info())),
            ]
        })
        .collect()
}

fn learner_lines<'a>(data: &'a DashboardData, theme: &dyn Theme) -> Vec<Line<'a>> {
    let header = Line::from(Span::styled(
        format!("{:<18} {:<28} {:>8}  {:<8} {}", "Name", "Email", "Progress", "Voucher", "Last active"),
        theme.text_secondary_style().add_modifier(Modifier::BOLD),
    ));
    let rows = data.learners.iter().map(|learner| {
        let voucher = match learner.voucher_redeemed {
            Some(true) => "yes",
            Some(false) => "no",
            None => "n/a",
        };
        Line::from(vec![
            Span::styled(format!("{:<18} ", learner.name), theme.text_primary_style()),
            Span::styled(format!("{:<28} ", learner.email), theme.text_muted_style()),
            Span::styled(format!("{:>7}%", learner.progress), th::progress_style(theme, learner.progress)),
            Span::styled(format!("  {voucher:<8} "), theme.text_primary_style()),
            Span::styled(learner.last_active, theme.text_muted_style()),
        ])
    });
    std::iter::once(header).chain(rows).collect()
}

fn support_lines<'a>(data: &'a DashboardData, theme: &dyn Theme) -> Vec<Line<'a>> {
    data.contacts
        .iter()
        .map(|contact| {
            Line::from(vec![
                Span::styled(format!("{}: ", contact.role), theme.text_secondary_style()),
                Span::styled(contact.name, theme.text_primary_style().add_modifier(Modifier::BOLD)),
                Span::styled(format!("  {}", contact.reach), theme.text_muted_style()),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::DraculaTheme;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right()).map(|x| buf[(x, y)].symbol()).collect()
    }

    #[test]
    fn panels_render_their_title_and_content() {
        let data = DashboardData::sample();
        let theme = DraculaTheme::new();
        let area = Rect::new(0, 0, 70, 8);
        let mut buf = Buffer::empty(area);

        render_panel(Panel::AlertsPanel, &data, &theme, area, &mut buf);
        assert!(row_text(&buf, 0).contains("Alerts"));
        assert!(row_text(&buf, 1).contains("Daniel Ruiz has been inactive"));
    }

    #[test]
    fn stats_grid_wraps_onto_a_second_row_when_narrow() {
        let data = DashboardData::sample();
        let theme = DraculaTheme::new();
        let area = Rect::new(0, 0, 80, 8);
        let mut buf = Buffer::empty(area);

        render_panel(Panel::StatsOverview, &data, &theme, area, &mut buf);
        assert!(row_text(&buf, 1).contains("Total Learners"));
        assert!(row_text(&buf, 4).contains("Upcoming Classes"));
    }
}
