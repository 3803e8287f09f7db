pub mod config;
pub mod pages;

use yew::prelude::*;

use crate::pages::roulette::RoulettePage;

/// The Activity is a single embedded view, so there is no router:
/// the app renders the roulette page directly.
#[function_component(App)]
pub fn app() -> Html {
    html! {
        <div class="min-h-screen bg-gray-900 text-gray-100">
            <RoulettePage />
        </div>
    }
}
