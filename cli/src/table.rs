// SPDX-FileCopyrightText: 2026 roombook contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::borrow::Cow;
use std::fmt;

use colored::{Color, Colorize};
use serde_json::{Map, Value};
use unicode_width::UnicodeWidthStr;

/// Rows of `data` laid out by `columns` in the given style.
#[derive(Debug)]
pub struct Table<'a, S, T, C> {
    style: S,
    columns: &'a [C],
    data: &'a [T],
}

impl<'a, S: TableStyle, T, C: TableColumn<T>> Table<'a, S, T, C> {
    pub fn new(style: S, columns: &'a [C], data: &'a [T]) -> Self {
        Self {
            style,
            columns,
            data,
        }
    }
}

impl<S: TableStyle, T, C: TableColumn<T>> fmt::Display for Table<'_, S, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.style.fmt_table(f, self.columns, self.data)
    }
}

pub trait TableColumn<T> {
    fn name(&self) -> Cow<'_, str>;

    fn format<'a>(&self, data: &'a T) -> Cow<'a, str>;

    fn padding_direction(&self) -> PaddingDirection {
        PaddingDirection::Left
    }

    fn color(&self, _data: &T) -> Option<Color> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingDirection {
    Left,
    Right,
}

pub trait TableStyle {
    fn fmt_table<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result;
}

/// Aligned plain-text columns with an optional header row.
#[derive(Debug, Clone, Copy)]
pub struct TableStyleBasic {
    separator: &'static str,
    header: bool,
}

impl TableStyleBasic {
    pub fn new() -> Self {
        Self {
            separator: "  ",
            header: true,
        }
    }

    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }
}

impl TableStyle for TableStyleBasic {
    fn fmt_table<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result {
        let names: Vec<_> = columns.iter().map(TableColumn::name).collect();
        let rows: Vec<Vec<_>> = data
            .iter()
            .map(|item| columns.iter().map(|col| col.format(item)).collect())
            .collect();

        let mut widths: Vec<usize> = match self.header {
            true => names.iter().map(|name| name.width()).collect(),
            false => vec![0; columns.len()],
        };
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }

        let mut first = true;
        if self.header {
            for (i, ((col, name), width)) in columns.iter().zip(&names).zip(&widths).enumerate() {
                let last = i + 1 == columns.len();
                let cell = pad(name, *width, col.padding_direction(), last);
                write!(f, "{}", cell.bold())?;
                if !last {
                    f.write_str(self.separator)?;
                }
            }
            first = false;
        }

        for (item, row) in data.iter().zip(&rows) {
            if !first {
                writeln!(f)?;
            }
            first = false;

            for (i, ((col, cell), width)) in columns.iter().zip(row).zip(&widths).enumerate() {
                let last = i + 1 == columns.len();
                let cell = pad(cell, *width, col.padding_direction(), last);
                match col.color(item) {
                    Some(color) => write!(f, "{}", cell.color(color))?,
                    None => f.write_str(&cell)?,
                }
                if !last {
                    f.write_str(self.separator)?;
                }
            }
        }
        Ok(())
    }
}

/// A JSON array with one object per row, keyed by column name.
#[derive(Debug, Clone, Copy)]
pub struct TableStyleJson;

impl TableStyleJson {
    pub fn new() -> Self {
        Self
    }
}

impl TableStyle for TableStyleJson {
    fn fmt_table<T, C: TableColumn<T>>(
        &self,
        f: &mut fmt::Formatter<'_>,
        columns: &[C],
        data: &[T],
    ) -> fmt::Result {
        let keys: Vec<String> = columns.iter().map(|col| json_key(&col.name())).collect();
        let rows: Vec<Value> = data
            .iter()
            .map(|item| {
                let map: Map<String, Value> = keys
                    .iter()
                    .zip(columns)
                    .map(|(key, col)| (key.clone(), Value::String(col.format(item).into_owned())))
                    .collect();
                Value::Object(map)
            })
            .collect();

        let text = serde_json::to_string_pretty(&rows).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

fn json_key(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

fn pad(cell: &str, width: usize, direction: PaddingDirection, last: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(cell.width()));
    match direction {
        PaddingDirection::Left if last => cell.to_string(),
        PaddingDirection::Left => format!("{cell}{fill}"),
        PaddingDirection::Right => format!("{fill}{cell}"),
    }
}
