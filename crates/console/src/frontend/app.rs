//! Leptos application with routing.

use leptos::*;
use leptos_router::*;

use riskdesk_auth::{AuthContext, AuthzError, Role, UserStatus};
use riskdesk_client::{HttpClient, ReinsuranceApi};
use riskdesk_core::{PolicyId, RecordId};
use riskdesk_reinsurance::format_amount;

use crate::allocation_table::{AllocationState, AllocationTable, AllocationView, SELECT_PROMPT};
use crate::directory::{
    confirm_and_delete, reload, submit_open_form, DirectoryCell, DirectoryView, UserDirectory,
    UserRow, EMPTY_MESSAGE, LOADING_MESSAGE,
};
use crate::editor::{Field, UserEditor};
use crate::frontend::platform::WindowConfirm;
use crate::routes::{self, AdminRoute, ConsoleRoute};

/// Collaborators shared by every page.
#[derive(Debug, Clone)]
pub struct ConsoleContext {
    pub api: HttpClient,
    pub auth: AuthContext,
}

impl DirectoryCell for RwSignal<UserDirectory> {
    fn with_mut<R>(&self, f: impl FnOnce(&mut UserDirectory) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// Which page the current location shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Users,
    Allocations,
    NotFound,
    Denied(AuthzError),
}

/// Main application component.
#[component]
pub fn App(ctx: ConsoleContext) -> impl IntoView {
    provide_context(ctx);

    view! {
        <Router>
            <Routes>
                <Route path="/*any" view=ConsolePage/>
            </Routes>
        </Router>
    }
}

#[component]
fn ConsolePage() -> impl IntoView {
    let ctx = expect_context::<ConsoleContext>();
    let location = use_location();

    let route = create_memo(move |_| {
        location
            .pathname
            .with(|path| routes::resolve(path, &ctx.auth))
    });
    let screen = create_memo(move |_| match route.get() {
        Ok(ConsoleRoute::Admin(AdminRoute::Users)) => Screen::Users,
        Ok(ConsoleRoute::Allocations(_)) => Screen::Allocations,
        Ok(ConsoleRoute::NotFound) => Screen::NotFound,
        Err(err) => Screen::Denied(err),
    });
    let policy = Signal::derive(move || match route.get() {
        Ok(ConsoleRoute::Allocations(policy_id)) => policy_id,
        _ => None,
    });

    view! {
        <div class="app">
            <header>
                <h1>"RiskDesk"</h1>
                <nav>
                    <A href={ConsoleRoute::Admin(AdminRoute::Users).path()}>"Users"</A>
                    <A href={ConsoleRoute::Allocations(None).path()}>"Allocations"</A>
                </nav>
            </header>

            <main>
                {move || match screen.get() {
                    Screen::Users => view! { <UserDirectoryPage/> }.into_view(),
                    Screen::Allocations => view! { <AllocationPage policy=policy/> }.into_view(),
                    Screen::NotFound => view! { <p class="empty">"Page not found"</p> }.into_view(),
                    Screen::Denied(err) => {
                        view! { <p class="error-banner">{err.to_string()}</p> }.into_view()
                    }
                }}
            </main>
        </div>
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

#[component]
fn UserDirectoryPage() -> impl IntoView {
    let ctx = expect_context::<ConsoleContext>();
    let directory = create_rw_signal(UserDirectory::new());

    let api = ctx.api.clone();
    spawn_local(async move { reload(&directory, &api).await });

    let on_edit = Callback::new(move |id: RecordId| {
        directory.update(|d| {
            if let Err(err) = d.open_edit(&id) {
                tracing::warn!(user_id = %id, error = %err, "cannot edit user");
            }
        });
    });

    let api = ctx.api.clone();
    let on_delete = Callback::new(move |id: RecordId| {
        let api = api.clone();
        spawn_local(async move {
            confirm_and_delete(&directory, &api, &id, &WindowConfirm).await;
        });
    });

    let api = ctx.api.clone();
    let on_submit = Callback::new(move |()| {
        let api = api.clone();
        spawn_local(async move {
            if let Err(err) = submit_open_form(&directory, &api).await {
                tracing::debug!(error = %err, "submit rejected");
            }
        });
    });

    view! {
        <div class="user-directory">
            <div class="toolbar">
                <h2>"User Management"</h2>
                <button class="primary" on:click=move |_| directory.update(UserDirectory::open_create)>
                    "Create User"
                </button>
            </div>

            {move || {
                directory
                    .with(|d| d.error().map(str::to_string))
                    .map(|message| view! { <div class="error-banner">{message}</div> })
            }}

            {move || match directory.with(UserDirectory::view) {
                DirectoryView::Loading => view! { <p class="loading">{LOADING_MESSAGE}</p> }.into_view(),
                DirectoryView::Empty => view! { <p class="empty">{EMPTY_MESSAGE}</p> }.into_view(),
                DirectoryView::Table(rows) => {
                    view! { <UserTable rows=rows on_edit=on_edit on_delete=on_delete/> }.into_view()
                }
            }}

            <Show when=move || directory.with(|d| d.editor().is_some())>
                <UserEditorModal directory=directory on_submit=on_submit/>
            </Show>
        </div>
    }
}

#[component]
fn UserTable(
    rows: Vec<UserRow>,
    on_edit: Callback<RecordId>,
    on_delete: Callback<RecordId>,
) -> impl IntoView {
    view! {
        <table class="users">
            <thead>
                <tr>
                    <th>"Username"</th>
                    <th>"Email"</th>
                    <th>"Role"</th>
                    <th>"Status"</th>
                    <th>"Last Login"</th>
                    <th>"Actions"</th>
                </tr>
            </thead>
            <tbody>
                {rows
                    .into_iter()
                    .map(|row| {
                        let edit_id = row.id.clone();
                        let delete_id = row.id.clone();
                        view! {
                            <tr>
                                <td><strong>{row.username}</strong></td>
                                <td>{row.email}</td>
                                <td>
                                    <span class="badge" style:background-color=row.role.color>
                                        {row.role.label}
                                    </span>
                                </td>
                                <td class="center">
                                    <span class="badge" style:background-color=row.status.color>
                                        {row.status.label}
                                    </span>
                                </td>
                                <td>{row.last_login}</td>
                                <td class="center">
                                    <button class="edit" on:click=move |_| on_edit.call(edit_id.clone())>
                                        "Edit"
                                    </button>
                                    <button class="delete" on:click=move |_| on_delete.call(delete_id.clone())>
                                        "Delete"
                                    </button>
                                </td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

fn read_editor<T: Default>(
    directory: RwSignal<UserDirectory>,
    read: impl FnOnce(&UserEditor) -> T,
) -> T {
    directory.with(|d| d.editor().map(read).unwrap_or_default())
}

fn write_field(directory: RwSignal<UserDirectory>, field: Field, value: String) {
    directory.update(|d| {
        if let Some(editor) = d.editor_mut() {
            if let Err(err) = editor.set_field(field, &value) {
                tracing::warn!(field = field.name(), error = %err, "rejected field value");
            }
        }
    });
}

#[component]
fn UserEditorModal(directory: RwSignal<UserDirectory>, on_submit: Callback<()>) -> impl IntoView {
    view! {
        <div class="modal-backdrop">
            <div class="modal">
                <h3>{move || read_editor(directory, UserEditor::title)}</h3>

                {move || {
                    read_editor(directory, |e| e.error().map(str::to_string))
                        .map(|message| view! { <div class="form-error">{message}</div> })
                }}

                <form on:submit=move |ev: ev::SubmitEvent| {
                    ev.prevent_default();
                    on_submit.call(());
                }>
                    <div class="form-group">
                        <label for="username">"Username"</label>
                        <input
                            id="username"
                            type="text"
                            required
                            disabled=move || read_editor(directory, UserEditor::username_locked)
                            prop:value=move || read_editor(directory, |e| e.form().username.clone())
                            on:input=move |ev| write_field(directory, Field::Username, event_target_value(&ev))
                        />
                    </div>

                    <div class="form-group">
                        <label for="email">"Email"</label>
                        <input
                            id="email"
                            type="email"
                            required
                            prop:value=move || read_editor(directory, |e| e.form().email.clone())
                            on:input=move |ev| write_field(directory, Field::Email, event_target_value(&ev))
                        />
                    </div>

                    <Show when=move || read_editor(directory, UserEditor::shows_password_field)>
                        <div class="form-group">
                            <label for="password">"Password"</label>
                            <input
                                id="password"
                                type="password"
                                required
                                prop:value=move || read_editor(directory, |e| e.form().password.clone())
                                on:input=move |ev| write_field(directory, Field::Password, event_target_value(&ev))
                            />
                        </div>
                    </Show>

                    <div class="form-group">
                        <label for="role">"Role"</label>
                        <select
                            id="role"
                            prop:value=move || read_editor(directory, |e| e.form().role.as_str().to_string())
                            on:change=move |ev| write_field(directory, Field::Role, event_target_value(&ev))
                        >
                            {Role::ASSIGNABLE
                                .iter()
                                .map(|role| view! { <option value=role.as_str()>{role.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="status">"Status"</label>
                        <select
                            id="status"
                            prop:value=move || read_editor(directory, |e| e.form().status.as_str().to_string())
                            on:change=move |ev| write_field(directory, Field::Status, event_target_value(&ev))
                        >
                            {UserStatus::ALL
                                .iter()
                                .map(|status| view! { <option value=status.as_str()>{status.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>

                    <div class="form-actions">
                        <button type="button" on:click=move |_| directory.update(UserDirectory::close_editor)>
                            "Cancel"
                        </button>
                        <button
                            type="submit"
                            class="primary"
                            disabled=move || read_editor(directory, UserEditor::is_saving)
                        >
                            {move || read_editor(directory, UserEditor::submit_label)}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reinsurance
// ─────────────────────────────────────────────────────────────────────────────

#[component]
fn AllocationPage(#[prop(into)] policy: Signal<Option<PolicyId>>) -> impl IntoView {
    let ctx = expect_context::<ConsoleContext>();
    let table = create_rw_signal(AllocationTable::new());

    create_effect(move |_| {
        let selected = policy.get();
        let requested = table
            .try_update(|t| t.select_policy(selected.as_ref().map(PolicyId::as_str)))
            .flatten();
        let Some(policy_id) = requested else {
            return;
        };
        let api = ctx.api.clone();
        spawn_local(async move {
            let result = api.risk_allocations(&policy_id).await;
            table.update(|t| t.finish_load(policy_id, result));
        });
    });

    let navigate = use_navigate();
    let draft = create_rw_signal(String::new());
    let open_policy = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let target = ConsoleRoute::Allocations(PolicyId::parse_optional(Some(&draft.get())));
        navigate(&target.path(), Default::default());
    };

    view! {
        <div class="allocations">
            <h2>"Reinsurance Allocations"</h2>

            <form class="policy-picker" on:submit=open_policy>
                <input
                    type="text"
                    placeholder="Policy ID"
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                />
                <button type="submit">"Show"</button>
            </form>

            {move || match table.with(|t| t.state().clone()) {
                AllocationState::Prompt => view! { <p class="prompt">{SELECT_PROMPT}</p> }.into_view(),
                AllocationState::Loading { .. } => {
                    view! { <p class="loading">"Loading allocations..."</p> }.into_view()
                }
                AllocationState::Failed { message, .. } => {
                    view! { <div class="error-banner">{message}</div> }.into_view()
                }
                AllocationState::Loaded(loaded) => view! { <AllocationGrid loaded=loaded/> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn AllocationGrid(loaded: AllocationView) -> impl IntoView {
    let warning = loaded.warning();
    let summary = loaded.summary.clone();

    view! {
        <div class="allocation-grid">
        {warning.map(|message| view! { <div class="warning-banner">{message}</div> })}

        <table class="allocations">
            <thead>
                <tr>
                    <th>"Reinsurer"</th>
                    <th>"Treaty"</th>
                    <th>"Amount"</th>
                    <th>"Percentage"</th>
                    <th>"Treaty Limit"</th>
                </tr>
            </thead>
            <tbody>
                {loaded
                    .rows
                    .into_iter()
                    .map(|row| {
                        view! {
                            <tr class:exceeded=row.exceeds_limit>
                                <td>{row.reinsurer}</td>
                                <td>{row.treaty}</td>
                                <td>{row.amount}</td>
                                <td>{row.percentage}</td>
                                <td>{row.treaty_limit}</td>
                            </tr>
                        }
                    })
                    .collect_view()}
            </tbody>
        </table>

        <dl class="retained">
            <dt>"Retained Amount"</dt>
            <dd>{loaded.retained_amount}</dd>
            <dt>"Ceded"</dt>
            <dd>
                {format!(
                    "{} ({}%)",
                    format_amount(summary.ceded_amount),
                    format_amount(summary.ceded_percentage)
                )}
            </dd>
            <dt>"Gross"</dt>
            <dd>{format_amount(summary.gross_amount)}</dd>
            <dt>"Retained Share"</dt>
            <dd>{summary.retained_share_label()}</dd>
        </dl>
        </div>
    }
}
