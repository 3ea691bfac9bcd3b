//! Svelte component block extractor.
//!
//! Splits a component into its `<script>` blocks, its `<style>` blocks and the
//! remaining markup. Scanning uses memchr rather than regex so malformed input
//! cannot trigger pathological backtracking.

use memchr::memmem;

/// Maximum file size in bytes (10 MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Maximum number of `<script>` (or `<style>`) tags in one component
pub const MAX_SCRIPT_TAGS: usize = 100;

/// Where a script block runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptContext {
    /// `<script context="module">`: runs once when the module is imported
    Module,
    /// Plain `<script>`: runs for each component instance
    Instance,
}

/// A script block's text, borrowed from the component source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedScript<'a> {
    pub source_text: &'a str,

    /// Byte offset of the script content in the component file
    pub source_offset: usize,

    pub context: ScriptContext,

    /// Language identifier (js, ts)
    pub lang: &'a str,
}

impl<'a> ExtractedScript<'a> {
    pub fn new(
        source_text: &'a str,
        source_offset: usize,
        context: ScriptContext,
        lang: &'a str,
    ) -> Self {
        Self {
            source_text,
            source_offset,
            context,
            lang,
        }
    }
}

/// A component split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component<'a> {
    pub scripts: Vec<ExtractedScript<'a>>,
    pub styles: Vec<&'a str>,
    /// Everything outside script and style blocks
    pub markup: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Too many <{tag}> tags: {count} found (max: {max} allowed)")]
    TooManyTags {
        tag: &'static str,
        count: usize,
        max: usize,
    },

    #[error("Unclosed <{tag}> tag starting at byte position {position}")]
    UnclosedTag { tag: &'static str, position: usize },
}

/// A block found in the source: the whole element span plus its content.
struct Block<'a> {
    start: usize,
    end: usize,
    attributes: &'a str,
    content: &'a str,
    content_start: usize,
}

/// Split a component source into scripts, styles and markup.
pub fn parse_component(source: &str) -> Result<Component<'_>, ExtractorError> {
    if source.len() > MAX_FILE_SIZE {
        return Err(ExtractorError::FileTooLarge {
            size: source.len(),
            max: MAX_FILE_SIZE,
        });
    }

    let (script_blocks, style_blocks) = top_level_blocks(
        source,
        find_blocks(source, "script")?,
        find_blocks(source, "style")?,
    );

    let mut spans: Vec<(usize, usize)> = script_blocks
        .iter()
        .chain(&style_blocks)
        .map(|b| (b.start, b.end))
        .collect();
    spans.sort_unstable();

    let mut markup = String::with_capacity(source.len());
    let mut cursor = 0;
    for (start, end) in spans {
        markup.push_str(&source[cursor..start]);
        cursor = end;
    }
    markup.push_str(&source[cursor..]);

    let scripts = script_blocks
        .iter()
        .map(|b| {
            ExtractedScript::new(
                b.content,
                b.content_start,
                script_context(b.attributes),
                extract_lang_attribute(b.attributes),
            )
        })
        .collect();

    Ok(Component {
        scripts,
        styles: style_blocks.iter().map(|b| b.content).collect(),
        markup,
    })
}

/// Keeps the outermost blocks: a `<style>` inside a script body, a `<script>`
/// inside a style body, and anything inside an HTML comment are text.
fn top_level_blocks<'a>(
    source: &str,
    scripts: Vec<Block<'a>>,
    styles: Vec<Block<'a>>,
) -> (Vec<Block<'a>>, Vec<Block<'a>>) {
    let bytes = source.as_bytes();
    let mut candidates: Vec<(bool, Block<'a>)> = scripts
        .into_iter()
        .map(|b| (true, b))
        .chain(styles.into_iter().map(|b| (false, b)))
        .collect();
    candidates.sort_by_key(|(_, b)| b.start);

    let mut kept_scripts = Vec::new();
    let mut kept_styles = Vec::new();
    let mut cursor = 0;

    'blocks: for (is_script, block) in candidates {
        // Only comments between kept blocks count; `<!--` in a body is text.
        while let Some(open) = find_from(bytes, cursor, b"<!--").filter(|&o| o < block.start) {
            cursor = find_from(bytes, open + 4, b"-->").map_or(bytes.len(), |pos| pos + 3);
        }
        if block.start < cursor {
            continue 'blocks;
        }

        cursor = block.end;
        if is_script {
            kept_scripts.push(block);
        } else {
            kept_styles.push(block);
        }
    }

    (kept_scripts, kept_styles)
}

fn find_blocks<'a>(source: &'a str, tag: &'static str) -> Result<Vec<Block<'a>>, ExtractorError> {
    let mut blocks = Vec::new();
    let mut pointer = 0;

    while let Some(block) = parse_block(source, tag, &mut pointer)? {
        blocks.push(block);

        if blocks.len() > MAX_SCRIPT_TAGS {
            return Err(ExtractorError::TooManyTags {
                tag,
                count: blocks.len(),
                max: MAX_SCRIPT_TAGS,
            });
        }
    }

    Ok(blocks)
}

/// Parses the next `<tag ...>...</tag>` block at or after `pointer`.
fn parse_block<'a>(
    source: &'a str,
    tag: &'static str,
    pointer: &mut usize,
) -> Result<Option<Block<'a>>, ExtractorError> {
    let bytes = source.as_bytes();
    let open = format!("<{tag}");
    let close = format!("</{tag}>");

    loop {
        let Some(start) = find_from(bytes, *pointer, open.as_bytes()) else {
            return Ok(None);
        };

        *pointer = start + open.len();

        // `<scripts>` or `<styled-thing>` are not our tag.
        if *pointer < bytes.len()
            && !matches!(bytes[*pointer], b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/')
        {
            continue;
        }

        let tag_end = find_closing_angle(bytes, *pointer)
            .ok_or(ExtractorError::UnclosedTag { tag, position: start })?;
        let attributes = &source[*pointer..tag_end];

        if tag_end > *pointer && bytes[tag_end - 1] == b'/' {
            *pointer = tag_end + 1;
            return Ok(Some(Block {
                start,
                end: tag_end + 1,
                attributes: &attributes[..attributes.len() - 1],
                content: "",
                content_start: tag_end + 1,
            }));
        }

        let content_start = tag_end + 1;
        let content_end = find_from(bytes, content_start, close.as_bytes())
            .ok_or(ExtractorError::UnclosedTag { tag, position: start })?;

        *pointer = content_end + close.len();

        return Ok(Some(Block {
            start,
            end: *pointer,
            attributes,
            content: &source[content_start..content_end],
            content_start,
        }));
    }
}

fn find_from(bytes: &[u8], start: usize, needle: &[u8]) -> Option<usize> {
    memmem::find(&bytes[start..], needle).map(|pos| start + pos)
}

/// Finds the closing `>` of an opening tag, skipping quoted attribute values.
fn find_closing_angle(bytes: &[u8], start: usize) -> Option<usize> {
    let mut in_quote = false;
    let mut quote_char = 0u8;

    for (i, &byte) in bytes[start..].iter().enumerate() {
        match byte {
            b'"' | b'\'' => {
                if !in_quote {
                    in_quote = true;
                    quote_char = byte;
                } else if byte == quote_char {
                    in_quote = false;
                }
            }
            b'>' if !in_quote => return Some(start + i),
            _ => {}
        }
    }

    None
}

fn script_context(attributes: &str) -> ScriptContext {
    let is_module = attributes.contains("context=\"module\"")
        || attributes.contains("context='module'")
        || attributes.split_whitespace().any(|attr| attr == "module");

    if is_module {
        ScriptContext::Module
    } else {
        ScriptContext::Instance
    }
}

/// Extracts the `lang` attribute value from a tag, defaulting to `js`.
fn extract_lang_attribute(attributes: &str) -> &str {
    let Some(lang_pos) = attributes.find("lang=") else {
        return "js";
    };

    let value = attributes[lang_pos + 5..].trim_start();

    match value.chars().next() {
        Some(quote @ ('"' | '\'')) => value[1..]
            .find(quote)
            .map(|end| &value[1..=end])
            .unwrap_or("js"),
        Some(_) => {
            let end = value
                .find(|c: char| c.is_whitespace() || c == '>')
                .unwrap_or(value.len());
            &value[..end]
        }
        None => "js",
    }
}
