//! Chip Picker Component
//!
//! Ranked search over the labels and team members not yet on a task.

use leptos::prelude::*;

use crate::models::BoardChip;

/// Match quality, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchRank {
    Prefix,
    WordStart,
    InOrder,
}

/// Case-insensitive match of `query` against a chip name. "Juan Díaz" is a
/// prefix match for "ju", a word-start match for "dí" and an in-order match
/// for "jd".
fn match_rank(query: &str, target: &str) -> Option<MatchRank> {
    let query = query.trim().to_lowercase();
    let target = target.to_lowercase();
    if target.starts_with(&query) {
        return Some(MatchRank::Prefix);
    }
    if target.split(|c: char| c.is_whitespace() || c == '-').any(|word| word.starts_with(&query)) {
        return Some(MatchRank::WordStart);
    }
    let mut rest = target.chars();
    query
        .chars()
        .all(|q| rest.any(|c| c == q))
        .then_some(MatchRank::InOrder)
}

/// Chips matching `query`, best matches first, ties in palette order
fn ranked(query: &str, chips: Vec<BoardChip>, limit: usize) -> Vec<BoardChip> {
    let mut hits: Vec<(MatchRank, BoardChip)> =
        chips.into_iter().filter_map(|chip| match_rank(query, chip.text()).map(|rank| (rank, chip))).collect();
    hits.sort_by_key(|(rank, _)| *rank);
    hits.into_iter().take(limit).map(|(_, chip)| chip).collect()
}

fn chip_class(chip: &BoardChip) -> String {
    match chip {
        BoardChip::Label(label) => format!("chip {}", label.color.css_class()),
        BoardChip::User(_) => "chip chip-user".to_string(),
    }
}

/// Props:
/// - available: chips that can still be added
/// - on_select: called with the chosen chip
#[component]
pub fn ChipPicker(
    #[prop(into)] available: Signal<Vec<BoardChip>>,
    #[prop(into)] on_select: Callback<BoardChip>,
) -> impl IntoView {
    let (input_value, set_input_value) = signal(String::new());
    let (selected_idx, set_selected_idx) = signal(0usize);

    let suggestions = move || ranked(&input_value.get(), available.get(), 6);

    let choose = move |chip: BoardChip| {
        on_select.run(chip);
        set_input_value.set(String::new());
        set_selected_idx.set(0);
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let sugg = suggestions();
        match ev.key().as_str() {
            "Enter" => {
                ev.prevent_default();
                if let Some(chip) = sugg.get(selected_idx.get()).cloned() {
                    choose(chip);
                }
            }
            "ArrowDown" => {
                ev.prevent_default();
                let sel = selected_idx.get();
                if sel + 1 < sugg.len() {
                    set_selected_idx.set(sel + 1);
                }
            }
            "ArrowUp" => {
                ev.prevent_default();
                let sel = selected_idx.get();
                if sel > 0 {
                    set_selected_idx.set(sel - 1);
                }
            }
            _ => {}
        }
    };

    view! {
        <div class="chip-picker">
            <input
                type="text"
                class="form-input"
                placeholder="Agregar etiqueta o miembro..."
                autocomplete="off"
                prop:value=move || input_value.get()
                on:input=move |ev| {
                    set_input_value.set(event_target_value(&ev));
                    set_selected_idx.set(0);
                }
                on:keydown=on_keydown
            />
            <div class="autocomplete-list">
                {move || {
                    let selected = selected_idx.get();
                    suggestions().into_iter().enumerate().map(|(i, chip)| {
                        let class = if i == selected {
                            format!("autocomplete-item selected {}", chip_class(&chip))
                        } else {
                            format!("autocomplete-item {}", chip_class(&chip))
                        };
                        let text = chip.text().to_string();
                        view! {
                            <button
                                type="button"
                                class=class
                                on:click=move |ev| {
                                    ev.prevent_default();
                                    choose(chip.clone());
                                }
                            >
                                {text}
                            </button>
                        }
                    }).collect_view()
                }}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::{Label, LabelColor};

    fn label(name: &str) -> BoardChip {
        BoardChip::Label(Label { id: name.to_lowercase(), name: name.to_string(), color: LabelColor::Blue })
    }

    #[test]
    fn test_match_rank() {
        assert_eq!(match_rank("dis", "Diseño"), Some(MatchRank::Prefix));
        assert_eq!(match_rank("", "Backend"), Some(MatchRank::Prefix));
        assert_eq!(match_rank("ops", "Dev Ops"), Some(MatchRank::WordStart));
        assert_eq!(match_rank("dse", "Diseño"), Some(MatchRank::InOrder));
        assert_eq!(match_rank("ops", "DevOs"), None);
    }

    #[test]
    fn test_prefix_matches_come_first() {
        let chips = vec![label("Kanban"), label("Frontend"), label("Backend"), label("Diseño")];
        let names: Vec<String> = ranked("ba", chips, 6).iter().map(|c| c.text().to_string()).collect();
        assert_eq!(names, vec!["Backend", "Kanban"]);

        let chips = vec![label("Frontend"), label("Investigación"), label("Diseño")];
        let names: Vec<String> = ranked("e", chips, 2).iter().map(|c| c.text().to_string()).collect();
        assert_eq!(names, vec!["Frontend", "Investigación"]);
    }
}
