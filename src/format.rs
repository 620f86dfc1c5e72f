//! Query string format reference
//!
//! This module documents the nested query string dialect read and written
//! by this library. It contains no code.
//!
//! # Overview
//!
//! A query string is a flat list of `key=value` pairs joined by a
//! delimiter (`&` by default). Nesting lives entirely in the keys: each
//! bracket group descends one level into an object or array.
//!
//! ```text
//! user[name]=Alice&user[tags][0]=admin&user[tags][1]=ops
//! ```
//!
//! parses to
//!
//! ```text
//! { user: { name: "Alice", tags: ["admin", "ops"] } }
//! ```
//!
//! # Keys
//!
//! ## Grammar
//!
//! ```text
//! key     = parent child*
//! parent  = [^\[\]]*           (may be empty)
//! child   = "[" [^\[\]]* "]"
//! ```
//!
//! - The parent is everything before the first bracket. An empty parent
//!   is skipped, so `[a]=b` is the same as `a=b`.
//! - At most `depth` children (default 5) are expanded. The remainder,
//!   starting at the next bracket group, becomes one literal segment
//!   wrapped in brackets: `a[b][c][d][e][f][g][h]=i` gives
//!   `{a: {b: {c: {d: {e: {f: {"[g][h]": "i"}}}}}}}`.
//! - Text that does not form a bracket group ends the grammar early
//!   (`a[b=c`, `a]b`). Whatever matched so far is used.
//!
//! ## Segments
//!
//! | Segment          | Meaning                                           |
//! |------------------|---------------------------------------------------|
//! | `name`           | object key                                        |
//! | `[]`             | one-element array (`a[]=x` gives `["x"]`)         |
//! | `[n]`, `n <= 20` | array position (`array_limit` controls the bound) |
//! | `[n]`, `n > 20`  | object key `"n"`                                  |
//! | `[-1]`, `[01x]`  | object key                                        |
//!
//! Sparse positions are closed up after parsing: `a[1]=b&a[15]=c` gives
//! `{a: ["b", "c"]}`, at every nesting level. Positions are stored sparsely
//! until then, so a large `array_limit` costs nothing per index.
//! A repeated `[]` key groups its values first and then wraps the group:
//! `a[]=x&a[]=y` gives `{a: [["x", "y"]]}`. A key that already holds a
//! scalar keeps it when a later key nests below it (`a=1&a[b]=2` gives
//! `{a: 1}`). Mixing positions and names under one key turns the
//! array into an object keyed by index: `a[0]=b&a[c]=d` gives
//! `{a: {"0": "b", c: "d"}}`.
//!
//! ## Reserved names
//!
//! Keys whose parent or any expanded child names a built-in object member
//! (`__proto__`, `constructor`, `hasOwnProperty`, `toString`, ...) are
//! dropped together with their value.
//!
//! # Values
//!
//! Values are percent-decoded, with `+` read as a space. Decoded text that
//! is a numeric literal becomes a number:
//!
//! | Text           | Value            |
//! |----------------|------------------|
//! | `42`, `007`    | `42`, `7`        |
//! | `1.5`, `1e3`   | `1.5`, `1000`    |
//! | `0x1F`, `0b11` | `31`, `3`        |
//! | `Infinity`     | infinity         |
//! | (empty)        | empty string     |
//! | `true`         | string `"true"`  |
//!
//! A malformed escape (`%zz`, `%E0%A4%A`) keeps the raw token instead of
//! failing. A pair without `=` sets its key to the empty string. A key
//! repeated at the top level collects its values into an array in
//! encounter order.
//!
//! # Writing
//!
//! Stringifying walks the value depth-first and emits one pair per scalar
//! leaf. Keys are written fully bracketed and percent-encoded, including
//! the brackets:
//!
//! | Value                | Pairs                              |
//! |----------------------|------------------------------------|
//! | `{a: "b"}`           | `a=b`                              |
//! | `{a: {b: "c"}}`      | `a%5Bb%5D=c`                       |
//! | `{a: ["x", "y"]}`    | `a%5B0%5D=x&a%5B1%5D=y`            |
//! | `{a: null}`          | `a=`                               |
//! | `{a: []}`, `{a: {}}` | (nothing)                          |
//! | date                 | ISO-8601 UTC with milliseconds     |
//!
//! Object keys keep insertion order. No depth or count limits apply when
//! writing, and the output is never prefixed with `?`.
//!
//! # Limits
//!
//! | Option            | Default | Applies to                          |
//! |-------------------|---------|-------------------------------------|
//! | `delimiter`       | `&`     | parse (split) and stringify (join)  |
//! | `depth`           | 5       | parse                               |
//! | `array_limit`     | 20      | parse                               |
//! | `parameter_limit` | 1000    | parse; pairs past the limit ignored |
