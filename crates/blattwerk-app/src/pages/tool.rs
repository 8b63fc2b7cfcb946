// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tool page — pick files, set options, run one catalog tool, save outputs.

use blattwerk_core::human_errors::humanize_error;
use blattwerk_core::{BlattwerkError, CompressionLevel, InputFile, ProcessedFile, ToolId};
use blattwerk_document::{ToolOptions, output_base_name};
use blattwerk_reorder::PageOrder;
use dioxus::prelude::*;

use crate::Route;
use crate::components::organize_grid::OrganizeGrid;
use crate::page_ranges::parse_split;
use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn Tool(id: String) -> Element {
    let state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    let mut inputs = use_signal(Vec::<InputFile>::new);
    let mut page_count = use_signal(|| 0usize);
    let mut order = use_signal(PageOrder::default);
    let mut compression = use_signal(|| state.read().config.default_compression);
    let mut custom_name = use_signal(String::new);
    let mut split_text = use_signal(String::new);
    let mut running = use_signal(|| false);
    let mut outputs = use_signal(Vec::<ProcessedFile>::new);
    let mut status_msg = use_signal(|| Option::<String>::None);

    let tool_id = match id.parse::<ToolId>() {
        Ok(tool_id) => tool_id,
        Err(_) => {
            return rsx! {
                div {
                    h1 { "Unknown tool" }
                    p { style: "color: #666;", "There is no tool called \"{id}\"." }
                    Link { to: Route::Home {}, "Back to all tools" }
                }
            };
        }
    };
    let tool = tool_id.tool();

    let file_label = if inputs.read().is_empty() {
        "No files chosen".to_string()
    } else {
        inputs
            .read()
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let default_name = output_base_name(&inputs.read(), &ToolOptions::default());
    let input_bytes: usize = inputs.read().iter().map(|f| f.data.len()).sum();
    let level_choices: Vec<(CompressionLevel, String)> = CompressionLevel::ALL
        .into_iter()
        .map(|level| {
            let text = if input_bytes > 0 {
                format!("{} (target {:.2} MB)", level.label(), level.estimated_mb(input_bytes))
            } else {
                level.label().to_string()
            };
            (level, text)
        })
        .collect();

    rsx! {
        div { style: "max-width: 960px;",
            Link { to: Route::Home {}, style: "color: #2f6f4f; text-decoration: none;", "\u{2190} All tools" }
            h1 { "{tool.name}" }
            p { style: "color: #666;", "{tool.description}" }

            // Pick input files
            button {
                style: "width: 100%; padding: 12px; border-radius: 8px; border: 1px solid #2f6f4f; color: #2f6f4f; background: white; font-size: 16px; margin: 16px 0 4px;",
                onclick: move |_| {
                    let mut dialog = rfd::FileDialog::new();
                    for doc_type in tool_id.accepted_inputs() {
                        dialog = dialog.add_filter(doc_type.mime_type(), doc_type.extensions());
                    }
                    let paths = if tool_id.accepts_multiple() {
                        dialog.pick_files().unwrap_or_default()
                    } else {
                        dialog.pick_file().into_iter().collect()
                    };
                    if paths.is_empty() {
                        return;
                    }

                    let picked: Result<Vec<InputFile>, BlattwerkError> =
                        paths.iter().map(|p| AppServices::read_input(p)).collect();
                    let picked = match picked {
                        Ok(files) => files,
                        Err(e) => {
                            status_msg.set(Some(humanize_error(&e).message));
                            return;
                        }
                    };

                    if tool_id.needs_page_count() {
                        match AppServices::page_count(&picked[0].data) {
                            Ok(count) => {
                                page_count.set(count);
                                order.set(PageOrder::identity(count));
                            }
                            Err(e) => {
                                let human = humanize_error(&e);
                                status_msg.set(Some(format!("{} {}", human.message, human.suggestion)));
                                return;
                            }
                        }
                    }

                    tracing::info!(tool = %tool_id, files = picked.len(), "inputs chosen");
                    outputs.set(Vec::new());
                    status_msg.set(None);
                    inputs.set(picked);
                },
                if tool_id.accepts_multiple() { "Choose files" } else { "Choose a file" }
            }
            p { style: "color: #888; font-size: 14px;", "{file_label}" }

            // Options
            if tool.has_compression {
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #e8e8e8;",
                    span { "Compression" }
                    select {
                        style: "padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                        value: compression.read().label(),
                        onchange: move |evt| {
                            if let Some(level) = CompressionLevel::ALL.into_iter().find(|l| l.label() == evt.value()) {
                                compression.set(level);
                            }
                        },
                        for (level, text) in level_choices {
                            option { key: "{level.label()}", value: level.label(), "{text}" }
                        }
                    }
                }
            }

            div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #e8e8e8;",
                span { "Output name" }
                input {
                    r#type: "text",
                    placeholder: "{default_name}",
                    style: "width: 240px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                    value: "{custom_name}",
                    oninput: move |evt| custom_name.set(evt.value()),
                }
            }

            if tool_id == ToolId::SplitPdf && *page_count.read() > 0 {
                div { style: "padding: 12px 0; border-bottom: 1px solid #e8e8e8;",
                    span { "Pages to keep (1-{page_count}). Use ; to make several files, e.g. 1-3; 4-6" }
                    input {
                        r#type: "text",
                        style: "width: 100%; margin-top: 8px; padding: 6px 8px; border: 1px solid #ccc; border-radius: 4px;",
                        value: "{split_text}",
                        oninput: move |evt| split_text.set(evt.value()),
                    }
                }
            }

            if tool_id == ToolId::OrganizePdf && *page_count.read() > 0 {
                h3 { "Drag pages into the order you want" }
                OrganizeGrid { order }
            }

            // Run
            button {
                style: "width: 100%; padding: 12px; border-radius: 8px; border: none; background: #2f6f4f; color: white; font-size: 16px; margin-top: 16px;",
                disabled: *running.read() || inputs.read().is_empty(),
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let split = if tool_id == ToolId::SplitPdf {
                            match parse_split(&split_text.read(), *page_count.read()) {
                                Ok(split) => split,
                                Err(msg) => {
                                    status_msg.set(Some(msg));
                                    return;
                                }
                            }
                        } else {
                            Default::default()
                        };
                        let name = custom_name.read().trim().to_string();
                        let options = ToolOptions {
                            compression: *compression.read(),
                            custom_name: (!name.is_empty()).then_some(name),
                            split,
                            page_order: (tool_id == ToolId::OrganizePdf).then(|| order.read().clone()),
                        };
                        let files = inputs.read().clone();
                        let svc = svc.clone();

                        running.set(true);
                        status_msg.set(Some("Working\u{2026}".into()));
                        spawn(async move {
                            match svc.run_tool(tool_id, files, options).await {
                                Ok(results) => {
                                    let count = results.len();
                                    outputs.set(results);
                                    status_msg.set(Some(format!("Done: {count} file(s) ready to save")));
                                }
                                Err(e) => {
                                    let human = humanize_error(&e);
                                    status_msg.set(Some(format!("{} {}", human.message, human.suggestion)));
                                }
                            }
                            running.set(false);
                        });
                    }
                },
                if *running.read() { "Working\u{2026}" } else { "Run {tool.name}" }
            }

            // Outputs
            for file in outputs.read().iter().cloned() {
                OutputRow { key: "{file.name}", file }
            }

            if let Some(ref msg) = *status_msg.read() {
                p { style: "margin-top: 8px; color: #666; font-size: 14px; text-align: center;",
                    "{msg}"
                }
            }
        }
    }
}

#[component]
fn OutputRow(file: ProcessedFile) -> Element {
    let mut saved = use_signal(|| Option::<String>::None);
    let kb = file.size.div_ceil(1024);
    let name = file.name.clone();

    rsx! {
        div { style: "display: flex; justify-content: space-between; align-items: center; padding: 10px 12px; margin-top: 8px; border: 1px solid #e0e0e0; border-radius: 8px; background: white;",
            span { "{name} ({kb} KB)" }
            button {
                style: "padding: 6px 14px; border-radius: 8px; border: 1px solid #2f6f4f; background: white; color: #2f6f4f;",
                onclick: move |_| {
                    let Some(path) = rfd::FileDialog::new().set_file_name(&file.name).save_file() else {
                        return;
                    };
                    match AppServices::write_output(&path, &file) {
                        Ok(()) => saved.set(Some(format!("Saved to {}", path.display()))),
                        Err(e) => saved.set(Some(humanize_error(&e).message)),
                    }
                },
                "Save"
            }
        }
        if let Some(ref msg) = *saved.read() {
            p { style: "color: #888; font-size: 12px; margin: 4px 12px;", "{msg}" }
        }
    }
}
