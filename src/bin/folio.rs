use clap::{Parser, Subcommand};
use folio::EditorConfig;
use folio::blocks::block_renderer::{render_post, to_html};
use folio::blocks::markdown_converter::{blocks_to_markdown, markdown_to_blocks};
use folio::blocks::{
    Alignment, BlockDocument, BlockType, BlockUpdate, Direction, blocks_to_json, load_blocks,
};
use folio::config::config_file_path;
use folio::error::FolioError;
use folio::freetext::{FreeTextEditor, MarkupSurface, MemorySurface, sanitize_markup};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(about = "Edit and render blog post content", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a post as HTML (block JSON, or free-text markup)
    Render {
        /// Post file: `.json` for blocks, anything else for markup
        file: PathBuf,
        /// Plain text body shown when the block list is empty
        #[arg(long)]
        legacy: Option<PathBuf>,
    },
    /// Edit a block document interactively
    Blocks {
        /// Block JSON file (created on save if missing)
        file: PathBuf,
    },
    /// Edit a free-text post interactively
    Write {
        /// Markup file (created on save if missing)
        file: PathBuf,
    },
    /// Convert Markdown to block JSON
    Import { file: PathBuf },
    /// Convert block JSON to Markdown
    Export { file: PathBuf },
    /// Show the config file location and the effective settings
    Config,
}

fn read_file(path: &Path) -> Result<String, FolioError> {
    fs::read_to_string(path).map_err(|e| FolioError::io(path, e))
}

/// Read a file that may not exist yet
fn read_optional(path: &Path) -> Result<String, FolioError> {
    if path.exists() {
        read_file(path)
    } else {
        Ok(String::new())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), FolioError> {
    fs::write(path, contents).map_err(|e| FolioError::io(path, e))
}

fn is_block_file(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

fn prompt(out: &mut impl Write) -> Result<(), FolioError> {
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

/// Undo the `\n` escapes used to enter multi-line values on one line
fn unescape(value: &str) -> String {
    value.replace("\\n", "\n")
}

fn parse_index(word: Option<&str>) -> Option<usize> {
    word.and_then(|w| w.parse().ok())
}

fn cmd_render(file: &Path, legacy: Option<&Path>) -> Result<(), FolioError> {
    let contents = read_file(file)?;

    if !is_block_file(file) {
        println!("{}", sanitize_markup(&contents));
        return Ok(());
    }

    let blocks = load_blocks(&contents)?;
    let legacy = legacy.map(read_file).transpose()?;
    println!("{}", to_html(&render_post(&blocks, legacy.as_deref())));
    Ok(())
}

fn cmd_import(file: &Path) -> Result<(), FolioError> {
    let blocks = markdown_to_blocks(&read_file(file)?);
    println!("{}", blocks_to_json(&blocks)?);
    Ok(())
}

fn cmd_export(file: &Path) -> Result<(), FolioError> {
    let blocks = load_blocks(&read_file(file)?)?;
    println!("{}", blocks_to_markdown(&blocks));
    Ok(())
}

fn cmd_config(config: &EditorConfig) -> Result<(), FolioError> {
    match config_file_path() {
        Some(path) => println!("# {}", path.display()),
        None => println!("# no config directory available"),
    }
    print!("{}", config.to_toml()?);
    Ok(())
}

fn print_blocks(doc: &BlockDocument, out: &mut impl Write) -> io::Result<()> {
    if doc.is_empty() {
        return writeln!(out, "(no content blocks yet)");
    }
    if doc.is_previewing() {
        return writeln!(out, "{}", to_html(&render_post(doc.blocks(), None)));
    }
    for (i, block) in doc.blocks().iter().enumerate() {
        let marker = if doc.selected() == Some(i) { '*' } else { ' ' };
        writeln!(out, "{marker}[{i}] {:<9} {}", block.block_type, block.preview())?;
    }
    Ok(())
}

fn print_blocks_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  add <type>                  - append a block ({})", known_types())?;
    writeln!(out, "  set <i> <field> <value>     - content, url, alt, caption, language, align")?;
    writeln!(out, "  item add <i>                - append an empty list item")?;
    writeln!(out, "  item set <i> <n> <text>     - edit a list item")?;
    writeln!(out, "  item rm <i> <n>             - remove a list item")?;
    writeln!(out, "  up <i> | down <i> | rm <i>  - move or delete a block")?;
    writeln!(out, "  select <i> | preview | show | save | quit")
}

fn known_types() -> String {
    BlockType::KNOWN
        .iter()
        .map(BlockType::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

fn field_update(field: &str, value: String) -> Option<BlockUpdate> {
    let update = BlockUpdate::new();
    let update = match field {
        "content" => update.content(value),
        "url" => update.image_url(value),
        "alt" => update.image_alt(value),
        "caption" => update.image_caption(value),
        "language" => update.language(value),
        "align" => update.alignment(Alignment::from_name(&value)?),
        _ => return None,
    };
    Some(update)
}

/// Run one block editing command. Returns false when the session should end.
fn blocks_command(
    line: &str,
    doc: &mut BlockDocument,
    file: &Path,
    config: &EditorConfig,
    out: &mut impl Write,
) -> Result<bool, FolioError> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(true);
    };

    match command {
        "add" => match words.next().map(BlockType::from_name) {
            Some(block_type) if block_type.is_known() => {
                let index = doc.append(block_type);
                writeln!(out, "added block {index}")?;
            }
            _ => writeln!(out, "usage: add <{}>", known_types())?,
        },
        "set" => {
            let index = parse_index(words.next());
            let field = words.next();
            let value = unescape(&words.collect::<Vec<_>>().join(" "));
            match (index, field) {
                (Some(index), Some(field)) => {
                    if field == "language" && !config.is_supported_language(&value) {
                        log::warn!("Language '{value}' is not in the configured list");
                    }
                    match field_update(field, value) {
                        Some(update) => doc.update(index, update)?,
                        None => writeln!(out, "unknown field or value '{field}'")?,
                    }
                }
                _ => writeln!(out, "usage: set <i> <field> <value>")?,
            }
        }
        "item" => {
            let action = words.next();
            let index = parse_index(words.next());
            match (action, index) {
                (Some("add"), Some(index)) => {
                    let item = doc.push_list_item(index)?;
                    writeln!(out, "added item {item}")?;
                }
                (Some("set"), Some(index)) => {
                    let Some(item) = parse_index(words.next()) else {
                        writeln!(out, "usage: item set <i> <n> <text>")?;
                        return Ok(true);
                    };
                    let text = words.collect::<Vec<_>>().join(" ");
                    doc.set_list_item(index, item, text)?;
                }
                (Some("rm"), Some(index)) => {
                    let Some(item) = parse_index(words.next()) else {
                        writeln!(out, "usage: item rm <i> <n>")?;
                        return Ok(true);
                    };
                    doc.remove_list_item(index, item)?;
                }
                _ => writeln!(out, "usage: item add|set|rm <i> ...")?,
            }
        }
        "up" | "down" => match parse_index(words.next()) {
            Some(index) => {
                let direction = if command == "up" {
                    Direction::Up
                } else {
                    Direction::Down
                };
                if !doc.move_block(index, direction)? {
                    writeln!(out, "block {index} cannot move {command}")?;
                }
            }
            None => writeln!(out, "usage: {command} <i>")?,
        },
        "rm" => match parse_index(words.next()) {
            Some(index) => {
                doc.delete(index)?;
            }
            None => writeln!(out, "usage: rm <i>")?,
        },
        "select" => match parse_index(words.next()) {
            Some(index) => doc.select(index)?,
            None => doc.clear_selection(),
        },
        "preview" => {
            let previewing = doc.toggle_preview();
            writeln!(out, "{}", if previewing { "previewing" } else { "editing" })?;
        }
        "show" => print_blocks(doc, out)?,
        "save" => {
            let blocks = doc.commit();
            // A failed write keeps the session and its unsaved edits
            match write_file(file, &blocks_to_json(&blocks)?) {
                Ok(()) => writeln!(out, "saved {} blocks to {}", blocks.len(), file.display())?,
                Err(err) => writeln!(out, "error: {err}")?,
            }
        }
        "quit" | "exit" => return Ok(false),
        "help" => print_blocks_help(out)?,
        other => writeln!(out, "unknown command '{other}', try 'help'")?,
    }

    Ok(true)
}

fn cmd_blocks(file: &Path, config: &EditorConfig) -> Result<(), FolioError> {
    let contents = read_optional(file)?;
    let blocks = if contents.trim().is_empty() {
        Vec::new()
    } else {
        load_blocks(&contents)?
    };
    let mut doc = BlockDocument::with_config(blocks, config);

    let stdin = io::stdin();
    let mut out = io::stdout();
    print_blocks(&doc, &mut out)?;
    prompt(&mut out)?;

    for line in stdin.lock().lines() {
        match blocks_command(&line?, &mut doc, file, config, &mut out) {
            Ok(true) => {}
            Ok(false) => return Ok(()),
            // Rejected edits leave the document untouched; keep the session
            Err(FolioError::Edit(err)) => writeln!(out, "error: {err}")?,
            Err(err) => return Err(err),
        }
        prompt(&mut out)?;
    }

    Ok(())
}

fn print_write_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  type <text>          - insert text at the caret")?;
    writeln!(out, "  select <start> <end> - select a byte range of the markup")?;
    writeln!(out, "  bold | italic | h1 | h2 | quote | tab")?;
    writeln!(out, "  link <url> | image <url> | upload <path>")?;
    writeln!(out, "  undo | redo | show | save | quit")
}

/// Run one free-text command. Returns false when the session should end.
fn write_command(
    line: &str,
    editor: &mut FreeTextEditor<MemorySurface>,
    file: &Path,
    out: &mut impl Write,
) -> Result<bool, FolioError> {
    let (command, rest) = line
        .trim()
        .split_once(' ')
        .unwrap_or((line.trim(), ""));

    let changed = match command {
        "" => return Ok(true),
        "type" => editor.insert_text(&unescape(rest)),
        "select" => {
            let mut words = rest.split_whitespace();
            let range = parse_index(words.next()).zip(parse_index(words.next()));
            if !range.is_some_and(|(start, end)| editor.surface_mut().select(start, end)) {
                writeln!(out, "invalid selection")?;
            }
            return Ok(true);
        }
        "bold" => editor.bold(),
        "italic" => editor.italic(),
        "h1" => editor.heading1(),
        "h2" => editor.heading2(),
        "quote" => editor.quote(),
        "tab" => editor.indent(),
        "link" => editor.insert_link(rest.trim()),
        "image" => editor.insert_image_url(rest.trim()),
        "upload" => match editor.insert_image_file(Path::new(rest.trim()), None) {
            Ok(changed) => changed,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                false
            }
        },
        "undo" => editor.undo(),
        "redo" => editor.redo(),
        "show" => {
            let history = editor.history();
            writeln!(out, "{}", editor.surface().current_markup())?;
            writeln!(out, "(version {} of {})", history.cursor() + 1, history.len())?;
            return Ok(true);
        }
        "save" => {
            let content = editor.save();
            match write_file(file, &content) {
                Ok(()) => writeln!(out, "saved {}", file.display())?,
                Err(err) => writeln!(out, "error: {err}")?,
            }
            return Ok(true);
        }
        "quit" | "exit" => return Ok(false),
        "help" => {
            print_write_help(out)?;
            return Ok(true);
        }
        other => {
            writeln!(out, "unknown command '{other}', try 'help'")?;
            return Ok(true);
        }
    };

    if !changed {
        writeln!(out, "(no change)")?;
    }
    Ok(true)
}

fn cmd_write(file: &Path, config: &EditorConfig) -> Result<(), FolioError> {
    let initial = read_optional(file)?;
    let mut editor = FreeTextEditor::with_config(MemorySurface::default(), &initial, config);

    let stdin = io::stdin();
    let mut out = io::stdout();
    prompt(&mut out)?;

    for line in stdin.lock().lines() {
        if !write_command(&line?, &mut editor, file, &mut out)? {
            break;
        }
        prompt(&mut out)?;
    }

    Ok(())
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let config = EditorConfig::load_default();

    let result = match args.command {
        Commands::Render { file, legacy } => cmd_render(&file, legacy.as_deref()),
        Commands::Blocks { file } => cmd_blocks(&file, &config),
        Commands::Write { file } => cmd_write(&file, &config),
        Commands::Import { file } => cmd_import(&file),
        Commands::Export { file } => cmd_export(&file),
        Commands::Config => cmd_config(&config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
