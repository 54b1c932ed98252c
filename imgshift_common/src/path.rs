// Copyright 2025 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing of path data (the `d` attribute) into commands.
//!
//! Parsing is tolerant: characters that are neither a command letter nor part of a number are
//! skipped, and an argument group that runs out of numbers before reaching the arity of its
//! command is dropped.

use smallvec::SmallVec;

/// The kind of a path command, independent of whether it is absolute or relative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// `M`: start a new subpath.
    MoveTo,
    /// `L`: straight line.
    LineTo,
    /// `H`: horizontal line.
    HorizontalLineTo,
    /// `V`: vertical line.
    VerticalLineTo,
    /// `C`: cubic Bézier.
    CubicTo,
    /// `S`: cubic Bézier whose first control point is reflected from the previous one.
    SmoothCubicTo,
    /// `Q`: quadratic Bézier.
    QuadTo,
    /// `T`: quadratic Bézier whose control point is reflected from the previous one.
    SmoothQuadTo,
    /// `A`: elliptical arc.
    ArcTo,
    /// `Z`: close the current subpath.
    ClosePath,
}

impl CommandKind {
    /// Look up the command for a path data letter.
    pub fn from_letter(letter: char) -> Option<(Self, bool)> {
        let kind = match letter.to_ascii_uppercase() {
            'M' => Self::MoveTo,
            'L' => Self::LineTo,
            'H' => Self::HorizontalLineTo,
            'V' => Self::VerticalLineTo,
            'C' => Self::CubicTo,
            'S' => Self::SmoothCubicTo,
            'Q' => Self::QuadTo,
            'T' => Self::SmoothQuadTo,
            'A' => Self::ArcTo,
            'Z' => Self::ClosePath,
            _ => return None,
        };
        Some((kind, letter.is_ascii_lowercase()))
    }

    /// The number of arguments one invocation of this command takes.
    pub fn arity(self) -> usize {
        match self {
            Self::ClosePath => 0,
            Self::HorizontalLineTo | Self::VerticalLineTo => 1,
            Self::MoveTo | Self::LineTo | Self::SmoothQuadTo => 2,
            Self::SmoothCubicTo | Self::QuadTo => 4,
            Self::CubicTo => 6,
            Self::ArcTo => 7,
        }
    }
}

/// A single path command with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    /// What the command does.
    pub kind: CommandKind,
    /// Whether the coordinates are relative to the current point.
    pub relative: bool,
    /// Exactly [`CommandKind::arity`] arguments.
    pub args: SmallVec<[f64; 7]>,
}

impl PathCommand {
    /// Create a new command.
    pub fn new(kind: CommandKind, relative: bool, args: &[f64]) -> Self {
        Self {
            kind,
            relative,
            args: SmallVec::from_slice(args),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Command(CommandKind, bool),
    Number(f64),
}

/// Parse path data into a list of commands.
///
/// After a moveto, further coordinate pairs are implicit linetos (relative if the moveto was
/// relative). Numbers following a closepath without a new command letter are ignored.
pub fn parse_path(d: &str) -> Vec<PathCommand> {
    let tokens = tokenize(d);
    let mut commands = Vec::new();
    let mut current: Option<(CommandKind, bool)> = None;
    let mut i = 0;

    while i < tokens.len() {
        if let Token::Command(kind, relative) = tokens[i] {
            current = Some((kind, relative));
            i += 1;
        }
        let Some((kind, relative)) = current else {
            // A number without a command to attach to.
            i += 1;
            continue;
        };

        if kind == CommandKind::ClosePath {
            commands.push(PathCommand::new(kind, relative, &[]));
            current = None;
            continue;
        }

        let arity = kind.arity();
        let mut args = SmallVec::<[f64; 7]>::new();
        while args.len() < arity {
            match tokens.get(i) {
                Some(Token::Number(n)) => {
                    args.push(*n);
                    i += 1;
                }
                _ => break,
            }
        }

        if args.len() == arity {
            commands.push(PathCommand {
                kind,
                relative,
                args,
            });
            if kind == CommandKind::MoveTo {
                current = Some((CommandKind::LineTo, relative));
            }
        }
    }

    commands
}

fn tokenize(d: &str) -> Vec<Token> {
    let bytes = d.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if let Some((kind, relative)) = CommandKind::from_letter(c) {
            tokens.push(Token::Command(kind, relative));
            i += 1;
        } else if let Some(end) = scan_number(bytes, i) {
            // The scanned range only contains ASCII, so it is valid UTF-8 and a valid float.
            if let Ok(n) = d[i..end].parse() {
                tokens.push(Token::Number(n));
            }
            i = end;
        } else {
            i += 1;
        }
    }
    tokens
}

/// Scan `[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?` starting at `start`.
fn scan_number(bytes: &[u8], start: usize) -> Option<usize> {
    let digits = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = start;
    if matches!(bytes.get(i), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_end = digits(i);
    let has_int = int_end > i;
    i = int_end;
    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits(i + 1);
        if !has_int && frac_end == i + 1 {
            return None;
        }
        i = frac_end;
    } else if !has_int {
        return None;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits(j);
        if exp_end > j {
            i = exp_end;
        }
    }
    Some(i)
}
