//! Interactive session

use addrbook_core::{Address, AddressMutator, AddressProvider, SortOrder};
use addrbook_query::{run_query, Page, ViewState};
use addrbook_state::StoreEvent;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::sync::Arc;
use tracing::debug;

use crate::app::AppContext;
use crate::form::AddressForm;
use crate::render::{city_state_postal, format_page};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShellAction {
    Search,
    Sort,
    NextPage,
    PreviousPage,
    PageSize,
    Add,
    Remove,
    Quit,
}

impl ShellAction {
    const ALL: [ShellAction; 8] = [
        ShellAction::Search,
        ShellAction::Sort,
        ShellAction::NextPage,
        ShellAction::PreviousPage,
        ShellAction::PageSize,
        ShellAction::Add,
        ShellAction::Remove,
        ShellAction::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            ShellAction::Search => "Search",
            ShellAction::Sort => "Sort",
            ShellAction::NextPage => "Next page",
            ShellAction::PreviousPage => "Previous page",
            ShellAction::PageSize => "Page size",
            ShellAction::Add => "Add address",
            ShellAction::Remove => "Remove address",
            ShellAction::Quit => "Quit",
        }
    }
}

const SORT_CHOICES: [(Option<SortOrder>, &str); 3] = [
    (Some(SortOrder::Newest), "Newest first"),
    (Some(SortOrder::Oldest), "Oldest first"),
    (None, "Unsorted"),
];

fn describe_view(view: &ViewState) -> String {
    let search = if view.search_text().trim().is_empty() {
        "none".to_string()
    } else {
        format!("\"{}\"", view.search_text())
    };
    let sort = view
        .sort()
        .map(|order| order.to_string())
        .unwrap_or_else(|| "unsorted".to_string());
    format!("Search: {}  Sort: {}  Page size: {}", search, sort, view.page_size())
}

fn notice(event: &StoreEvent) {
    let address = event.address();
    let message = match event {
        StoreEvent::Added { .. } => format!("✅ Address added ({})", address.id),
        StoreEvent::Removed { .. } => format!("🗑️  Address {} removed", address.id),
        StoreEvent::Updated { .. } => format!("✏️  Address {} updated", address.id),
    };
    println!("{}", message.green());
}

fn current_page(store: &dyn AddressProvider, view: &ViewState) -> Page<Address> {
    run_query(&store.list(), &view.query())
}

/// Run the interactive session until the user quits
pub fn run_shell(context: &AppContext) -> anyhow::Result<()> {
    let theme = ColorfulTheme::default();
    let mut view = ViewState::new(&context.config.query);
    let subscription = context.store.subscribe(Arc::new(notice));

    loop {
        let page = current_page(context.store.as_ref(), &view);
        println!();
        print!("{}", format_page(&page));
        println!("{}", describe_view(&view).dimmed());

        let labels: Vec<&str> = ShellAction::ALL.iter().map(|a| a.label()).collect();
        let choice = Select::with_theme(&theme)
            .with_prompt("Action")
            .items(&labels)
            .default(0)
            .interact()?;

        match ShellAction::ALL[choice] {
            ShellAction::Search => {
                let text: String = Input::with_theme(&theme)
                    .with_prompt("Search")
                    .with_initial_text(view.search_text())
                    .allow_empty(true)
                    .interact_text()?;
                if !view.set_search(&text) {
                    debug!("Search unchanged");
                }
            }

            ShellAction::Sort => {
                let labels: Vec<&str> = SORT_CHOICES.iter().map(|(_, label)| *label).collect();
                let current = SORT_CHOICES
                    .iter()
                    .position(|(order, _)| *order == view.sort())
                    .unwrap_or(0);
                let index = Select::with_theme(&theme)
                    .with_prompt("Sort by")
                    .items(&labels)
                    .default(current)
                    .interact()?;
                view.set_sort(SORT_CHOICES[index].0);
            }

            ShellAction::NextPage => {
                if !view.next_page(page.total) {
                    println!("Already on the last page.");
                }
            }

            ShellAction::PreviousPage => {
                if !view.previous_page() {
                    println!("Already on the first page.");
                }
            }

            ShellAction::PageSize => {
                let options = view.page_size_options().to_vec();
                let labels: Vec<String> = options.iter().map(|size| size.to_string()).collect();
                let current = options
                    .iter()
                    .position(|size| *size == view.page_size())
                    .unwrap_or(0);
                let index = Select::with_theme(&theme)
                    .with_prompt("Page size")
                    .items(&labels)
                    .default(current)
                    .interact()?;
                view.set_page_size(options[index]);
            }

            ShellAction::Add => {
                let form = prompt_form(&theme)?;
                let errors = form.validate();
                if errors.is_empty() {
                    context.store.add(form.into_request()?);
                    context.persist()?;
                } else {
                    for error in errors {
                        println!("{} {}", "✗".red(), error);
                    }
                }
            }

            ShellAction::Remove => {
                if page.items.is_empty() {
                    println!("Nothing to remove on this page.");
                    continue;
                }
                let mut labels: Vec<String> = page
                    .items
                    .iter()
                    .map(|a| format!("{}  {}  {}", a.id, a.street, city_state_postal(a)))
                    .collect();
                labels.push("Cancel".to_string());
                let index = Select::with_theme(&theme)
                    .with_prompt("Remove which address?")
                    .items(&labels)
                    .default(labels.len() - 1)
                    .interact()?;
                if let Some(address) = page.items.get(index) {
                    context.store.remove(&address.id);
                    context.persist()?;
                }
            }

            ShellAction::Quit => break,
        }
    }

    context.store.unsubscribe(subscription);
    Ok(())
}

fn prompt_form(theme: &ColorfulTheme) -> anyhow::Result<AddressForm> {
    let ask = |prompt: &str, optional: bool| -> anyhow::Result<String> {
        let value: String = Input::with_theme(theme)
            .with_prompt(prompt)
            .allow_empty(optional)
            .interact_text()?;
        Ok(value)
    };

    Ok(AddressForm {
        country: ask("Country", false)?,
        street: ask("Street address", false)?,
        address_line2: ask("Address line 2 (optional)", true)?,
        city: ask("City", false)?,
        state_province: ask("State / province", false)?,
        postal_code: ask("Postal code", false)?,
    })
}
