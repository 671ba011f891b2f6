//! Interactive session over a `PostStore`
//!
//! One line per command. Titles and bodies are separated by `|`, and a
//! literal `\n` in a body becomes a line break.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use super::render::render_view;
use crate::application::{CreateOutcome, PostStore, UpdateOutcome};
use crate::domain::{PostDraft, PostId};
use crate::shared::{StoreError, StoreResult};

pub const HELP: &str = "\
Commands:
  list | show                 show the current page
  page <n>                    go to page n
  next | prev                 move one page
  add <title> | <body>        create a post
  edit <id> <title> | <body>  replace title and body of a post
  delete <id>                 delete a post
  reload                      fetch all posts again
  help                        this text
  quit | exit                 leave
";

/// A parsed user intent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Show,
    Page(usize),
    Next,
    Prev,
    Add(PostDraft),
    Edit { id: PostId, title: String, body: String },
    Delete(PostId),
    Reload,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "" | "list" | "show" => Ok(ShellCommand::Show),
        "page" => parse_number(rest, "page").map(ShellCommand::Page),
        "next" | "n" => Ok(ShellCommand::Next),
        "prev" | "p" => Ok(ShellCommand::Prev),
        "add" => {
            let (title, body) = split_text(rest)?;
            Ok(ShellCommand::Add(PostDraft::new(title, body)))
        }
        "edit" => {
            let (id, text) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: edit <id> <title> | <body>".to_string())?;
            let id = parse_number(id, "id")?;
            let (title, body) = split_text(text)?;
            Ok(ShellCommand::Edit { id, title, body })
        }
        "delete" | "rm" => parse_number(rest, "id").map(ShellCommand::Delete),
        "reload" => Ok(ShellCommand::Reload),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command '{}', try 'help'", other)),
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str) -> Result<T, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("invalid {}: '{}'", what, value.trim()))
}

fn split_text(text: &str) -> Result<(String, String), String> {
    let (title, body) = text
        .split_once('|')
        .ok_or_else(|| "expected '<title> | <body>'".to_string())?;
    Ok((title.trim().to_string(), body.trim().replace("\\n", "\n")))
}

/// Apply one command to the store and describe what happened.
///
/// Add and edit enforce the presence check before anything is sent.
pub async fn execute(store: &mut PostStore, command: ShellCommand) -> StoreResult<String> {
    debug!(?command, "Executing");

    let message = match command {
        ShellCommand::Show | ShellCommand::Help | ShellCommand::Quit => String::new(),
        ShellCommand::Page(page) => {
            let selected = store.go_to_page(page);
            if selected != page {
                format!("Page {} is out of range, showing page {}", page, selected)
            } else {
                String::new()
            }
        }
        ShellCommand::Next => {
            store.next_page();
            String::new()
        }
        ShellCommand::Prev => {
            store.prev_page();
            String::new()
        }
        ShellCommand::Add(draft) => {
            PostStore::validate_draft(&draft)?;
            match store.create(draft).await? {
                CreateOutcome::Appended(post) => {
                    store.go_to_page(store.total_pages());
                    format!("Created post {}", post.id)
                }
                CreateOutcome::Replaced { post, .. } => {
                    if let Some(page) = store.page_of(post.id) {
                        store.go_to_page(page);
                    }
                    format!("Created post {} (replaced the listed post with the same id)", post.id)
                }
            }
        }
        ShellCommand::Edit { id, title, body } => {
            let edited = store
                .get(id)
                .map(|post| post.with_changes(title, body))
                .ok_or(StoreError::NotListed(id))?;
            PostStore::validate_draft(&PostDraft::new(edited.title.as_str(), edited.body.as_str()))?;

            match store.update(edited).await? {
                UpdateOutcome::Replaced { .. } => {
                    if let Some(page) = store.page_of(id) {
                        store.go_to_page(page);
                    }
                    format!("Updated post {}", id)
                }
                UpdateOutcome::MissingLocally => {
                    format!("Post {} was updated remotely but is no longer listed; reload to resync", id)
                }
            }
        }
        ShellCommand::Delete(id) => {
            if store.remove(id).await? {
                format!("Deleted post {}", id)
            } else {
                format!("Deleted post {} (it was not listed)", id)
            }
        }
        ShellCommand::Reload => {
            let count = store.load().await?;
            format!("Loaded {} posts", count)
        }
    };

    Ok(message)
}

/// Read commands until `quit` or end of input, printing the current page after each.
///
/// Store errors are printed and the session continues.
pub async fn run_shell<R, W>(store: &mut PostStore, reader: R, writer: &mut W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    writer.write_all(render_view(&store.current_view()).as_bytes()).await?;
    writer.write_all(b"> ").await?;
    writer.flush().await?;

    while let Some(line) = lines.next_line().await? {
        let output = match parse_command(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(ShellCommand::Help) => HELP.to_string(),
            Ok(command) => match execute(store, command).await {
                Ok(message) => with_view(store, message),
                Err(e) => format!("Error: {}\n", e),
            },
            Err(e) => format!("Error: {}\n", e),
        };

        writer.write_all(output.as_bytes()).await?;
        writer.write_all(b"> ").await?;
        writer.flush().await?;
    }

    writer.write_all(b"\n").await?;
    writer.flush().await
}

fn with_view(store: &PostStore, message: String) -> String {
    let view = render_view(&store.current_view());
    if message.is_empty() {
        view
    } else {
        format!("{}\n{}", message, view)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::Post;
    use crate::infrastructure::{InMemoryRemote, RemoteOp};

    async fn store_with(remote: Arc<InMemoryRemote>, page_size: usize) -> PostStore {
        let mut store = PostStore::new(remote, page_size).unwrap();
        store.load().await.unwrap();
        store
    }

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command(""), Ok(ShellCommand::Show));
        assert_eq!(parse_command("page 3"), Ok(ShellCommand::Page(3)));
        assert_eq!(parse_command("NEXT"), Ok(ShellCommand::Next));
        assert_eq!(parse_command("delete 7"), Ok(ShellCommand::Delete(7)));
        assert_eq!(
            parse_command("add Hello world | line one\\nline two"),
            Ok(ShellCommand::Add(PostDraft::new("Hello world", "line one\nline two")))
        );
        assert_eq!(
            parse_command("edit 4 New title | New body"),
            Ok(ShellCommand::Edit {
                id: 4,
                title: "New title".into(),
                body: "New body".into()
            })
        );
    }

    #[test]
    fn rejects_malformed_commands() {
        assert!(parse_command("page two").is_err());
        assert!(parse_command("add no separator").is_err());
        assert!(parse_command("edit 4").is_err());
        assert!(parse_command("frobnicate").is_err());
    }

    #[tokio::test]
    async fn add_validates_before_sending() {
        let remote = Arc::new(InMemoryRemote::sample(3));
        let mut store = store_with(remote.clone(), 2).await;

        let err = execute(&mut store, ShellCommand::Add(PostDraft::new("", "body")))
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(remote.call_count(RemoteOp::Create), 0);
    }

    #[tokio::test]
    async fn add_jumps_to_last_page() {
        let mut store = store_with(Arc::new(InMemoryRemote::sample(4)), 2).await;

        let message = execute(&mut store, ShellCommand::Add(PostDraft::new("New", "N")))
            .await
            .unwrap();

        assert_eq!(message, "Created post 5");
        assert_eq!(store.current_page(), 3);
        assert_eq!(store.current_view().items, &[Post::new(5, "New", "N")]);
    }

    #[tokio::test]
    async fn add_reports_reused_id() {
        // Answers every create with id 101, like jsonplaceholder.typicode.com
        struct FixedId;

        #[async_trait::async_trait]
        impl crate::domain::RemoteResource for FixedId {
            async fn fetch_all(&self) -> crate::domain::RemoteResult<Vec<Post>> {
                Ok(vec![Post::new(1, "A", "a"), Post::new(2, "B", "b"), Post::new(3, "C", "c")])
            }
            async fn create(&self, draft: &PostDraft) -> crate::domain::RemoteResult<Post> {
                Ok(Post::new(101, draft.title.clone(), draft.body.clone()))
            }
            async fn update(&self, post: &Post) -> crate::domain::RemoteResult<Post> {
                Ok(post.clone())
            }
            async fn delete(&self, _: PostId) -> crate::domain::RemoteResult<()> {
                Ok(())
            }
        }

        let mut store = PostStore::new(Arc::new(FixedId), 2).unwrap();
        store.load().await.unwrap();

        let first = execute(&mut store, ShellCommand::Add(PostDraft::new("One", "1")))
            .await
            .unwrap();
        assert_eq!(first, "Created post 101");

        store.go_to_page(1);
        let second = execute(&mut store, ShellCommand::Add(PostDraft::new("Two", "2")))
            .await
            .unwrap();

        assert_eq!(second, "Created post 101 (replaced the listed post with the same id)");
        assert_eq!(store.len(), 4);
        assert_eq!(store.current_page(), 2);
        assert_eq!(store.get(101).unwrap().title, "Two");
    }

    #[tokio::test]
    async fn edit_keeps_user_id_and_shows_its_page() {
        let mut store = store_with(Arc::new(InMemoryRemote::sample(5)), 2).await;

        execute(
            &mut store,
            ShellCommand::Edit {
                id: 3,
                title: "T".into(),
                body: "B".into(),
            },
        )
        .await
        .unwrap();

        let post = store.get(3).unwrap();
        assert_eq!(post.title, "T");
        assert_eq!(post.user_id, Some(1));
        assert_eq!(store.current_page(), 2);
    }

    #[tokio::test]
    async fn edit_of_unlisted_post_is_refused() {
        let remote = Arc::new(InMemoryRemote::sample(2));
        let mut store = store_with(remote.clone(), 2).await;

        let result = execute(
            &mut store,
            ShellCommand::Edit {
                id: 9,
                title: "T".into(),
                body: "B".into(),
            },
        )
        .await;

        assert!(matches!(result, Err(StoreError::NotListed(9))));
        assert_eq!(remote.call_count(RemoteOp::Update), 0);
    }

    #[tokio::test]
    async fn shell_session_runs_until_quit() {
        let remote = Arc::new(InMemoryRemote::sample(3));
        let mut store = store_with(remote.clone(), 2).await;
        let input = "next\ndelete 3\nadd Fresh | Post\nbogus\nquit\nnext\n";
        let mut output = Vec::new();

        run_shell(&mut store, input.as_bytes(), &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Page 2/2 (posts 3-3 of 3)"));
        assert!(output.contains("Deleted post 3"));
        assert!(output.contains("Created post 4"));
        assert!(output.contains("Error: unknown command 'bogus'"));
        assert_eq!(store.len(), 3);
        assert_eq!(remote.len(), 3);
    }

    #[tokio::test]
    async fn shell_reports_remote_failures_and_continues() {
        let remote = Arc::new(InMemoryRemote::sample(3));
        let mut store = store_with(remote.clone(), 10).await;
        remote.fail_next(RemoteOp::Delete, "connection reset");
        let mut output = Vec::new();

        run_shell(&mut store, "delete 1\ndelete 1\n".as_bytes(), &mut output)
            .await
            .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Error: Failed to delete post 1: Remote unavailable: connection reset"));
        assert!(output.contains("Deleted post 1"));
        assert_eq!(store.len(), 2);
    }
}
