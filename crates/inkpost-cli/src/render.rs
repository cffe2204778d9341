//! Terminal rendering of the view models.

use chrono::Utc;
use colored::Colorize;

use inkpost_application::list_controller::{ListContent, ListViewModel};
use inkpost_core::feedback::{FeedbackBoard, Severity};
use inkpost_core::list::PageControls;
use inkpost_core::post::model::Post;
use inkpost_core::view::{Nav, NavBar};

pub fn print_nav_bar(bar: &NavBar) {
    let actions: Vec<String> = bar
        .actions
        .iter()
        .map(|action| action.to_string())
        .collect();
    let mut line = actions.join(" | ");
    if bar.protected_links_visible {
        line = format!("Dashboard | New Post | {line}");
    }
    println!("{}", line.dimmed());
}

pub fn print_list(view: &ListViewModel) {
    match &view.content {
        ListContent::Blank => {}
        ListContent::Loading => println!("{}", "Loading...".dimmed()),
        ListContent::NoResults => println!("{}", "No posts found.".yellow()),
        ListContent::Posts(items) => {
            for post in items {
                let author = post.author.as_deref().unwrap_or("unknown");
                println!(
                    "{:>4}  {}  {}",
                    post.id,
                    post.title.bold(),
                    format!("({} by {author})", post.date).dimmed()
                );
                let excerpt: String = post.content.chars().take(100).collect();
                println!("      {excerpt}");
            }
        }
    }

    if let Some(controls) = &view.controls {
        print_controls(controls);
    }

    if let Some(notice) = &view.error_notice {
        println!("{}", notice.red());
    }
}

fn print_controls(controls: &PageControls) {
    let mut parts = Vec::new();
    if controls.prev.is_some() {
        parts.push("[Prev]".to_string());
    }
    for link in &controls.pages {
        if link.active {
            parts.push(format!("{}", link.number.to_string().bold().underline()));
        } else {
            parts.push(link.number.to_string());
        }
    }
    if controls.next.is_some() {
        parts.push("[Next]".to_string());
    }
    println!("{}", parts.join(" "));
}

pub fn print_post(post: &Post) {
    println!("{}", post.title.bold());
    println!("{}", format!("Posted on {}", post.date).dimmed());
    if let Some(image) = &post.image {
        println!("{}", format!("[image: {image}]").dimmed());
    }
    println!();
    println!("{}", post.content);
}

pub fn print_feedback(board: &FeedbackBoard) {
    let now = Utc::now();
    if let Some(notice) = board.notice(now) {
        let text = match notice.severity {
            Severity::Success => notice.text.green(),
            Severity::Error => notice.text.red(),
            Severity::Info => notice.text.normal(),
        };
        println!("{text}");
    }
    for (field, error) in board.visible_field_errors(now) {
        println!("{}: {}", field.red().bold(), error.text.red());
    }
}

/// Honors the delayed-navigation contract: the confirmation stays on
/// screen for the delay before the "view change" is announced.
pub async fn follow_nav(nav: &Nav) {
    match nav {
        Nav::Stay => {}
        Nav::To(view) => println!("{}", format!("-> {view:?}").dimmed()),
        Nav::ToAfter(view, delay) => {
            tokio::time::sleep(*delay).await;
            println!("{}", format!("-> {view:?}").dimmed());
        }
    }
}
