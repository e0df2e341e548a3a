use std::fmt::Display;
use std::io::{self, Write};

use nbt_codec::{Compound, NbtString, Tag, ValueRef};

const INDENT: &str = "    ";

/// Writes the tree as one line per tag, children indented below their
/// parent.
pub(crate) fn print_root<W: Write>(
    out: &mut W,
    root_name: &NbtString,
    root: &Compound,
) -> io::Result<()> {
    print_value(out, Some(root_name), ValueRef::Compound(root), 0)
}

fn print_value<W: Write>(
    out: &mut W,
    name: Option<&NbtString>,
    value: ValueRef<'_>,
    depth: usize,
) -> io::Result<()> {
    write!(out, "{}{}", INDENT.repeat(depth), tag_label(value.tag()))?;

    if let Some(name) = name {
        write!(out, " \"{name}\"")?;
    }

    match value {
        ValueRef::Byte(v) => writeln!(out, ": {v}"),
        ValueRef::Short(v) => writeln!(out, ": {v}"),
        ValueRef::Int(v) => writeln!(out, ": {v}"),
        ValueRef::Long(v) => writeln!(out, ": {v}"),
        ValueRef::Float(v) => writeln!(out, ": {v}"),
        ValueRef::Double(v) => writeln!(out, ": {v}"),
        ValueRef::ByteArray(v) => writeln!(out, ": {}", join(v)),
        ValueRef::String(v) => writeln!(out, ": {v}"),
        ValueRef::IntArray(v) => writeln!(out, ": {}", join(v)),
        ValueRef::LongArray(v) => writeln!(out, ": {}", join(v)),
        ValueRef::List(l) => {
            writeln!(out, " [{}] of {} {{", l.len(), tag_label(l.element_tag()))?;
            for elem in l {
                print_value(out, None, elem, depth + 1)?;
            }
            writeln!(out, "{}}}", INDENT.repeat(depth))
        }
        ValueRef::Compound(c) => {
            writeln!(out, " [{}] {{", c.len())?;
            for (k, v) in c {
                print_value(out, Some(k), v.into(), depth + 1)?;
            }
            writeln!(out, "{}}}", INDENT.repeat(depth))
        }
    }
}

fn tag_label(tag: Tag) -> &'static str {
    match tag {
        Tag::End => "TAG_End",
        Tag::Byte => "TAG_Byte",
        Tag::Short => "TAG_Short",
        Tag::Int => "TAG_Int",
        Tag::Long => "TAG_Long",
        Tag::Float => "TAG_Float",
        Tag::Double => "TAG_Double",
        Tag::ByteArray => "TAG_Byte_Array",
        Tag::String => "TAG_String",
        Tag::List => "TAG_List",
        Tag::Compound => "TAG_Compound",
        Tag::IntArray => "TAG_Int_Array",
        Tag::LongArray => "TAG_Long_Array",
    }
}

fn join<T: Display>(elems: &[T]) -> String {
    let parts: Vec<String> = elems.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}
