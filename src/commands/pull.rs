use std::io::IsTerminal;

use anyhow::Result;

use super::{connect, load_config};
use crate::cli::{Cli, PullResource};
use crate::prompt::{InteractivePrompt, NonInteractive, SelectionProvider};
use crate::pull::{CancelFlag, PullOptions, PullTarget, Puller};
use crate::store::LocalStore;

pub async fn run(
    cli: &Cli,
    resource: Option<PullResource>,
    all: bool,
    ids: Vec<String>,
    no_code: bool,
) -> Result<()> {
    let config = load_config(cli)?;
    let mut store = LocalStore::load(&cli.project_file)?;
    let client = connect(cli, &config, &store)?;

    let selector: &dyn SelectionProvider = if std::io::stdin().is_terminal() {
        &InteractivePrompt
    } else {
        &NonInteractive
    };

    let target = match resource {
        None => PullTarget::Ask,
        Some(resource) => match resource.category() {
            Some(category) => PullTarget::One(category),
            None => PullTarget::All,
        },
    };

    let options = PullOptions {
        bulk: all,
        database_ids: ids,
        code: !no_code,
        page_size: config.pull.page_size,
    };

    let cancel = CancelFlag::new();
    let watcher = cancel.watch_ctrl_c();

    let result = Puller::new(&client, selector, &mut store, &cli.project_file, options)
        .with_cancel(cancel)
        .run(target)
        .await;

    watcher.abort();
    result
}
