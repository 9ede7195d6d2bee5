//! App Root Component
//!
//! Provides global state, fetches the activity list once on mount and lays
//! out the two views.

use leptos::*;

use crate::components::{ActivityList, SignupForm, StatusLine, TodoForm, TodoList};
use crate::state::global::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_global_state();

    spawn_local(state.load_activities());

    view! {
        <header>
            <h1>"Mergington High School"</h1>
            <h2>"Extracurricular Activities"</h2>
        </header>

        <main>
            <section id="activities-container">
                <h3>"Available Activities"</h3>
                <ActivityList />
            </section>

            <section id="signup-container">
                <h3>"Sign Up for an Activity"</h3>
                <SignupForm />
                <StatusLine message=state.activity_status />
            </section>

            <section id="todos-container">
                <h3>"My Tasks"</h3>
                <TodoForm />
                <StatusLine message=state.todo_status />
                <TodoList />
            </section>
        </main>

        <footer>
            <p>"© 2025 Mergington High School"</p>
        </footer>
    }
}
