// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Home page — tool catalog with category filter and default settings.

use blattwerk_core::{CompressionLevel, PdfTool, TOOLS, ToolCategory, tools_in};
use dioxus::prelude::*;

use crate::Route;
use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn Home() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    let category = state.read().category;
    let visible: Vec<&'static PdfTool> = match category {
        Some(cat) => tools_in(cat).collect(),
        None => TOOLS.iter().collect(),
    };

    rsx! {
        div {
            h1 { "Blattwerk" }
            p { style: "color: #666;", "Convert, merge, split, compress, and reorder PDFs on your own machine." }

            // Category filter
            div { style: "display: flex; gap: 8px; margin: 16px 0;",
                FilterChip {
                    label: "All",
                    active: category.is_none(),
                    onclick: move |_| state.write().category = None,
                }
                for cat in ToolCategory::ALL {
                    FilterChip {
                        key: "{cat.label()}",
                        label: cat.label(),
                        active: category == Some(cat),
                        onclick: move |_| state.write().category = Some(cat),
                    }
                }
            }

            // Tool cards
            div { style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 12px;",
                for tool in visible {
                    ToolCard { key: "{tool.id}", tool: tool.id.slug(), name: tool.name, description: tool.description }
                }
            }

            // Defaults
            section { style: "margin-top: 32px;",
                h3 { "Defaults" }
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #e8e8e8; max-width: 480px;",
                    span { "Compression" }
                    select {
                        style: "padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                        value: state.read().config.default_compression.label(),
                        onchange: move |evt| {
                            let picked = CompressionLevel::ALL
                                .into_iter()
                                .find(|level| level.label() == evt.value());
                            if let Some(level) = picked {
                                let mut config = state.read().config.clone();
                                config.default_compression = level;
                                match svc.save_config(&config) {
                                    Ok(()) => tracing::info!(?level, "default compression saved"),
                                    Err(e) => {
                                        tracing::error!(error = %e, "config save failed");
                                        state.write().status_message = Some(format!("Could not save settings: {e}"));
                                    }
                                }
                                state.write().config = config;
                            }
                        },
                        for level in CompressionLevel::ALL {
                            option { key: "{level.label()}", value: level.label(), "{level.label()}" }
                        }
                    }
                }
            }

            if let Some(ref msg) = state.read().status_message {
                p { style: "color: #ff9500; font-size: 14px; margin-top: 12px;", "{msg}" }
            }
        }
    }
}

#[component]
fn FilterChip(label: &'static str, active: bool, onclick: EventHandler<MouseEvent>) -> Element {
    let (bg, fg) = if active { ("#2f6f4f", "white") } else { ("white", "#333") };
    rsx! {
        button {
            style: "padding: 6px 14px; border-radius: 16px; border: 1px solid #ccc; background: {bg}; color: {fg}; font-size: 14px;",
            onclick: move |evt| onclick.call(evt),
            "{label}"
        }
    }
}

#[component]
fn ToolCard(tool: &'static str, name: &'static str, description: &'static str) -> Element {
    rsx! {
        Link { to: Route::Tool { id: tool.to_string() },
            style: "display: block; padding: 16px; border: 1px solid #e0e0e0; border-radius: 12px; text-decoration: none; color: #333; background: white;",
            strong { style: "font-size: 16px;", "{name}" }
            p { style: "color: #666; font-size: 14px; margin: 6px 0 0;", "{description}" }
        }
    }
}
