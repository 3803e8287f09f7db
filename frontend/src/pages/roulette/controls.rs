use wasm_bindgen::JsCast;
use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

use shared::roulette::MAX_ITEM_LEN;

#[derive(Properties, PartialEq)]
pub struct SpinButtonProps {
    pub is_spinning: bool,
    pub can_spin: bool,
    pub onclick: Callback<MouseEvent>,
}

#[function_component(SpinButton)]
pub fn spin_button(props: &SpinButtonProps) -> Html {
    let is_disabled = props.is_spinning || !props.can_spin;

    let button_text = if props.is_spinning {
        "Spinning..."
    } else if !props.can_spin {
        "Add items first"
    } else {
        "Spin the wheel"
    };

    let button_class = if is_disabled {
        "bg-gradient-to-r from-gray-500 to-gray-600 opacity-75 cursor-not-allowed text-white"
    } else {
        "bg-gradient-to-r from-yellow-400 to-orange-500 hover:from-yellow-500 hover:to-orange-600 text-white shadow-lg hover:shadow-xl transform hover:-translate-y-0.5 active:translate-y-0"
    };

    let spin_icon_class = if props.is_spinning {
        "inline-block mr-2 animate-spin"
    } else {
        "hidden"
    };

    html! {
        <button
            onclick={props.onclick.clone()}
            disabled={is_disabled}
            class={classes!(
                "px-8",
                "py-4",
                "rounded-full",
                "font-bold",
                "text-lg",
                "transition-all",
                "duration-300",
                button_class,
            )}
        >
            <div class="flex items-center justify-center">
                <svg class={spin_icon_class} xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
                    <circle cx="12" cy="12" r="10" />
                    <path d="M12 6v6l4 2" />
                </svg>
                <span>{button_text}</span>
            </div>
        </button>
    }
}

#[derive(Properties, PartialEq)]
pub struct ResultBannerProps {
    pub result: String,
    pub visible: bool,
}

#[function_component(ResultBanner)]
pub fn result_banner(props: &ResultBannerProps) -> Html {
    if !props.visible || props.result.is_empty() {
        return html! {};
    }

    html! {
        <div class="mt-6 flex justify-center">
            <div class="px-6 py-4 rounded-xl bg-gradient-to-r from-violet-500 to-purple-600 text-white font-bold text-xl shadow-lg border-2 border-violet-300 animate-bounce">
                {format!("🎯 {}", props.result)}
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ItemPanelProps {
    pub items: Vec<String>,
    pub input: String,
    pub disabled: bool,
    pub oninput: Callback<String>,
    pub onadd: Callback<()>,
    pub onremove: Callback<String>,
}

/// Sidebar with the entry input and the live item list. Unlike the
/// wheel face, this always tracks the latest document, even mid-spin.
#[function_component(ItemPanel)]
pub fn item_panel(props: &ItemPanelProps) -> Html {
    let oninput = {
        let cb = props.oninput.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            {
                cb.emit(input.value());
            }
        })
    };

    let onkeydown = {
        let cb = props.onadd.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                cb.emit(());
            }
        })
    };

    let onclick_add = {
        let cb = props.onadd.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };

    html! {
        <div class="bg-gray-800 p-6 rounded-2xl shadow-xl w-full max-w-sm">
            <h2 class="text-xl font-bold mb-4">{"Items"}</h2>

            <div class="flex gap-2 mb-4">
                <input
                    type="text"
                    value={props.input.clone()}
                    {oninput}
                    {onkeydown}
                    disabled={props.disabled}
                    maxlength={MAX_ITEM_LEN.to_string()}
                    placeholder="Add an item"
                    class="flex-1 px-4 py-2 rounded-lg bg-gray-700 border border-gray-600 focus:outline-none focus:ring-2 focus:ring-violet-400 text-gray-100 placeholder-gray-400"
                />
                <button
                    onclick={onclick_add}
                    disabled={props.disabled}
                    class="px-4 py-2 rounded-lg bg-violet-600 hover:bg-violet-500 disabled:opacity-50 disabled:cursor-not-allowed font-medium transition-colors"
                >
                    {"Add"}
                </button>
            </div>

            <div class="flex flex-wrap gap-2">
                { for props.items.iter().map(|item| {
                    let onremove = {
                        let cb = props.onremove.clone();
                        let item = item.clone();
                        Callback::from(move |_: MouseEvent| cb.emit(item.clone()))
                    };
                    html! {
                        <span class="inline-flex items-center gap-1 px-3 py-1 rounded-full bg-gray-700 text-sm">
                            {item}
                            <button
                                onclick={onremove}
                                class="text-gray-400 hover:text-red-400 transition-colors font-bold"
                                title="Remove"
                            >
                                {"×"}
                            </button>
                        </span>
                    }
                })}
            </div>

            if props.items.is_empty() {
                <p class="text-sm text-gray-500 mt-2">{"No items yet — everyone in the session can add some."}</p>
            }
        </div>
    }
}
