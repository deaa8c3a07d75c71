//! Plain-text rendering of dashboard panels.

use chrono::Utc;
use serde::Serialize;

use medichain_contracts::{
    error::{PortalError, PortalResult},
    session::Session,
};
use medichain_ref_portal::{
    mock_data,
    panels::{
        analytics::{self, ChartKind},
        appointments,
        dashboard::{self, Panel},
        notifications::NotificationFeed,
        patients, records,
        settings::{self, SettingsTab},
    },
    Portal,
};

use crate::DashboardArgs;

pub fn dashboard(portal: &Portal, args: &DashboardArgs) -> PortalResult<()> {
    let Some(role) = portal.manager().current_role() else {
        println!("Not signed in. Run `medichain login` first.");
        return Ok(());
    };
    let session = portal.open_panel(role, args.panel)?;

    if !args.json {
        print_header(&session, args.panel);
    }

    match args.panel {
        Panel::Home => home(&session, args.json),
        Panel::Patients => patient_list(args),
        Panel::Appointments => appointment_list(&session, args),
        Panel::Records => record_list(&session, args),
        Panel::Notifications => notification_feed(&session, args.json),
        Panel::Analytics => analytics_panel(&session, args),
        Panel::Settings => settings_panel(portal, &session, args),
    }
}

fn print_header(session: &Session, current: Panel) {
    let nav: Vec<String> = dashboard::navigation(session.role)
        .into_iter()
        .map(|p| {
            if p == current {
                format!("[{}]", p.label())
            } else {
                p.label().to_string()
            }
        })
        .collect();
    println!("{} · {}", session.role.label(), current.route(session.role));
    println!("{}", nav.join("  "));
    println!();
}

fn print_json<T: Serialize>(value: &T) -> PortalResult<()> {
    let out = serde_json::to_string_pretty(value).map_err(|e| PortalError::Storage {
        reason: format!("failed to encode panel: {}", e),
    })?;
    println!("{}", out);
    Ok(())
}

// ── Panels ────────────────────────────────────────────────────────────────────

fn home(session: &Session, json: bool) -> PortalResult<()> {
    let stats = dashboard::home_stats(session.role);
    if json {
        return print_json(&stats);
    }
    println!("{}", dashboard::greeting(&session.display_name));
    println!();
    for stat in stats {
        println!("  {:<24} {}", stat.name, stat.value);
    }
    Ok(())
}

fn patient_list(args: &DashboardArgs) -> PortalResult<()> {
    let all = mock_data::patients();
    let term = args.search.as_deref().unwrap_or("");
    let found = patients::search(&all, term);
    if args.json {
        return print_json(&found);
    }
    if found.is_empty() {
        println!("{}", patients::no_match_message(term));
        return Ok(());
    }
    for p in found {
        println!("  #{:<3} {:<16} {:<28} {}", p.id, p.name, p.email, p.condition);
    }
    Ok(())
}

fn appointment_list(session: &Session, args: &DashboardArgs) -> PortalResult<()> {
    let rows = appointments::rows(session, args.tab, Utc::now());
    if args.json {
        return print_json(&rows);
    }
    println!("{} appointments", args.tab.label());
    if rows.is_empty() {
        println!("  {}", appointments::empty_message(args.tab));
        return Ok(());
    }
    for row in rows {
        println!(
            "  {:<20} {:<9} {:<18} {:<13} {}",
            row.date, row.time, row.counterpart, row.kind, row.status
        );
        if let Some(notes) = row.notes {
            println!("      {}", notes);
        }
    }
    Ok(())
}

fn record_list(session: &Session, args: &DashboardArgs) -> PortalResult<()> {
    let visible = records::visible(&mock_data::medical_records(), session);
    let found = records::search(&visible, args.search.as_deref().unwrap_or(""));
    if args.json {
        return print_json(&found);
    }
    if records::can_edit(session.role) {
        println!("(doctors may add and edit records)");
    }
    if found.is_empty() {
        println!("  No records found");
        return Ok(());
    }
    for record in found {
        println!("  {}", records::summary_line(record));
    }
    Ok(())
}

fn notification_feed(session: &Session, json: bool) -> PortalResult<()> {
    let feed = NotificationFeed::for_session(mock_data::notifications(Utc::now()), session);
    if json {
        return print_json(&feed.all());
    }
    println!("Unread ({})", feed.unread_count());
    for n in feed.unread() {
        println!("  • {} | {}", n.title, n.message);
        if let Some(action) = n.kind.action_label() {
            println!("      {}", action);
        }
    }
    println!();
    println!("Earlier");
    for n in feed.read() {
        println!("    {} | {}", n.title, n.message);
    }
    Ok(())
}

fn analytics_panel(session: &Session, args: &DashboardArgs) -> PortalResult<()> {
    let data = analytics::chart_data(session.role, args.range, &mut rand::thread_rng());
    let stats = analytics::stats(session.role);
    if args.json {
        return print_json(&(stats, data));
    }

    for card in &stats {
        println!("  {:<26} {:>5}  ({})", card.title, card.value, card.change_label());
    }
    println!();
    println!("{} · {} · {}", data.title, args.range.label(), args.chart.label());
    match args.chart {
        ChartKind::Pie => {
            for slice in &data.pie {
                println!("  {:<20} {:>3}% {}", slice.label, slice.percent, "#".repeat(slice.percent as usize / 2));
            }
        }
        ChartKind::Line | ChartKind::Bar => {
            for series in &data.series {
                println!("  {}", series.name);
                let max = series.values.iter().copied().max().unwrap_or(0).max(1);
                for (label, value) in data.labels.iter().zip(&series.values) {
                    let width = (*value * 30 / max) as usize;
                    println!("    {:<7} {:>3} {}", label, value, "#".repeat(width));
                }
            }
        }
    }
    Ok(())
}

fn settings_panel(portal: &Portal, session: &Session, args: &DashboardArgs) -> PortalResult<()> {
    let mut prefs = portal.preferences();
    let mut changed = false;
    if args.dark_mode {
        prefs.toggle_dark_mode();
        changed = true;
    }
    if let Some(id) = &args.toggle {
        match settings::flip(&mut prefs, session.role, id) {
            Some(_) => changed = true,
            None => {
                return Err(PortalError::validation("toggle", format!("unknown option '{}'", id)));
            }
        }
    }
    if changed {
        portal.save_preferences(&prefs)?;
    }
    if args.json {
        return print_json(&prefs);
    }

    for tab in SettingsTab::ALL {
        println!("{}", tab.label());
        match tab {
            SettingsTab::Profile => {
                for (label, value) in settings::profile_fields(session) {
                    println!("  {:<24} {}", label, value);
                }
                println!("  {:<24} {}", "Dark mode", if prefs.dark_mode { "on" } else { "off" });
            }
            SettingsTab::Notifications | SettingsTab::Privacy => {
                for (option, enabled) in settings::resolve(settings::options_for(tab, session.role), &prefs) {
                    let mark = if enabled { "x" } else { " " };
                    println!("  [{}] {:<20} {}", mark, option.id, option.label);
                }
            }
            SettingsTab::Security => {
                for (label, value) in settings::security_items() {
                    println!("  {:<28} {}", label, value);
                }
            }
            SettingsTab::Devices => {
                for (label, value) in settings::devices() {
                    println!("  {:<28} {}", label, value);
                }
            }
        }
        println!();
    }
    Ok(())
}
