//! Parser helper functions.

use crate::parser::lexer::{Lexer, Token};
use crate::types::{
    CapabilitySet, Flag, Flags, ListResponse, Mailbox, MailboxAttribute, NamespaceDescriptor,
    Namespaces, ResponseCode, SeqNum, Uid, UidValidity,
};
use crate::{Error, Result};

use super::types::StatusItem;

/// Parses a response code.
pub fn parse_response_code(lexer: &mut Lexer<'_>) -> Result<ResponseCode> {
    lexer.expect(Token::LBracket)?;

    let atom = lexer.read_atom_string()?;
    let upper = atom.to_uppercase();

    let code = match upper.as_str() {
        "ALERT" => ResponseCode::Alert,
        "PARSE" => ResponseCode::Parse,
        "READ-ONLY" => ResponseCode::ReadOnly,
        "READ-WRITE" => ResponseCode::ReadWrite,
        "TRYCREATE" => ResponseCode::TryCreate,
        "NOMODSEQ" => ResponseCode::NoModSeq,
        "UIDNOTSTICKY" => ResponseCode::UidNotSticky,
        "CLOSED" => ResponseCode::Closed,
        "NOTSAVED" => ResponseCode::NotSaved,
        "UIDNEXT" => {
            lexer.expect_space()?;
            let n = lexer.read_number()?;
            let uid = Uid::new(n).ok_or_else(|| Error::parse_at(lexer.position(), "invalid UID 0"))?;
            ResponseCode::UidNext(uid)
        }
        // UIDVALIDITY 0 is unusual but tolerated: some servers report it
        // transiently while a mailbox is being created.
        "UIDVALIDITY" => {
            lexer.expect_space()?;
            let n = lexer.read_number()?;
            ResponseCode::UidValidity(UidValidity::new(n))
        }
        // UNSEEN 0 is tolerated the same way (an empty mailbox has no
        // first-unseen message, and some servers report 0 rather than
        // omitting the code).
        "UNSEEN" => {
            lexer.expect_space()?;
            let n = lexer.read_number()?;
            ResponseCode::Unseen(n)
        }
        "HIGHESTMODSEQ" => {
            lexer.expect_space()?;
            let n = u64::from(lexer.read_number()?);
            ResponseCode::HighestModSeq(n)
        }
        "CAPABILITY" => {
            let atoms = read_bracket_atoms(lexer)?;
            ResponseCode::Capability(atoms)
        }
        "PERMANENTFLAGS" => {
            lexer.expect_space()?;
            let flags = parse_flag_list(lexer)?;
            ResponseCode::PermanentFlags(flags.into_iter().collect())
        }
        "BADCHARSET" => {
            let charsets = read_bracket_atoms(lexer)?;
            ResponseCode::BadCharset(charsets)
        }
        "UNDEFINED-FILTER" => {
            lexer.expect_space()?;
            let name = lexer.read_atom_string()?.to_string();
            ResponseCode::UndefinedFilter(name)
        }
        _ => {
            // Skip until ] and capture any trailing free text as the unknown
            // code's payload.
            let start = lexer.position();
            while lexer.peek() != Some(b']') && !lexer.is_eof() {
                lexer.advance();
            }
            let text = lexer.text_since(start);
            let text = text.trim();
            ResponseCode::Unknown(
                atom.to_string(),
                if text.is_empty() { None } else { Some(text.to_string()) },
            )
        }
    };

    // Skip to closing bracket
    while lexer.peek() != Some(b']') && !lexer.is_eof() {
        lexer.advance();
    }
    lexer.expect(Token::RBracket)?;

    Ok(code)
}

/// Reads a space-separated run of atoms up to (not including) the closing `]`.
fn read_bracket_atoms(lexer: &mut Lexer<'_>) -> Result<Vec<String>> {
    let mut atoms = Vec::new();
    while lexer.peek() == Some(b' ') {
        lexer.advance();
        if let Token::Atom(s) = lexer.next_token()? {
            atoms.push(s.to_string());
        }
    }
    Ok(atoms)
}

/// Parses capability data into a full [`CapabilitySet`].
pub fn parse_capability_data(lexer: &mut Lexer<'_>) -> Result<CapabilitySet> {
    let mut atoms = Vec::new();

    while lexer.peek() == Some(b' ') {
        lexer.advance();
        if let Token::Atom(s) = lexer.next_token()? {
            atoms.push(s.to_string());
        }
    }

    Ok(CapabilitySet::from_atoms(atoms.iter().map(String::as_str)))
}

/// Parses a flag list.
pub fn parse_flag_list(lexer: &mut Lexer<'_>) -> Result<Flags> {
    lexer.expect(Token::LParen)?;

    let mut flags = Flags::new();

    loop {
        match lexer.next_token()? {
            Token::RParen => break,
            Token::Atom(s) => flags.insert(Flag::parse(s)),
            Token::Space => continue,
            token => {
                return Err(Error::parse_at(
                    lexer.position(),
                    format!("unexpected token in flag list: {token:?}"),
                ));
            }
        }
    }

    Ok(flags)
}

/// Parses a LIST response.
pub fn parse_list_response(lexer: &mut Lexer<'_>) -> Result<ListResponse> {
    // Parse attributes
    lexer.expect(Token::LParen)?;
    let mut attributes = Vec::new();

    loop {
        match lexer.next_token()? {
            Token::RParen => break,
            Token::Atom(s) => attributes.push(MailboxAttribute::parse(s)),
            Token::Space => continue,
            token => {
                return Err(Error::parse_at(
                    lexer.position(),
                    format!("unexpected token in LIST attributes: {token:?}"),
                ));
            }
        }
    }

    lexer.expect_space()?;

    // Parse delimiter
    let delimiter = match lexer.next_token()? {
        Token::Nil => None,
        Token::QuotedString(s) => s.chars().next(),
        token => {
            return Err(Error::parse_at(
                lexer.position(),
                format!("expected delimiter, got {token:?}"),
            ));
        }
    };

    lexer.expect_space()?;

    // Parse mailbox name
    let mailbox_name = lexer.read_astring()?;

    Ok(ListResponse {
        attributes,
        delimiter,
        mailbox: Mailbox::new(mailbox_name),
    })
}

/// Parses a SEARCH response.
pub fn parse_search_response(lexer: &mut Lexer<'_>) -> Result<Vec<SeqNum>> {
    let mut nums = Vec::new();

    while lexer.peek() == Some(b' ') {
        lexer.advance();
        if let Token::Number(n) = lexer.next_token()?
            && let Some(seq) = SeqNum::new(n)
        {
            nums.push(seq);
        }
    }

    Ok(nums)
}

/// Parses a STATUS response.
pub fn parse_status_response(lexer: &mut Lexer<'_>) -> Result<(Mailbox, Vec<StatusItem>)> {
    let mailbox_name = lexer.read_astring()?;
    lexer.expect_space()?;
    lexer.expect(Token::LParen)?;

    let mut items = Vec::new();

    loop {
        match lexer.next_token()? {
            Token::RParen => break,
            Token::Space => continue,
            Token::Atom(name) => {
                lexer.expect_space()?;
                let value = lexer.read_number()?;

                let item = match name.to_uppercase().as_str() {
                    "MESSAGES" => StatusItem::Messages(value),
                    "RECENT" => StatusItem::Recent(value),
                    "UIDNEXT" => {
                        if let Some(uid) = Uid::new(value) {
                            StatusItem::UidNext(uid)
                        } else {
                            continue;
                        }
                    }
                    "UIDVALIDITY" => StatusItem::UidValidity(UidValidity::new(value)),
                    "UNSEEN" => StatusItem::Unseen(value),
                    "HIGHESTMODSEQ" => StatusItem::HighestModSeq(u64::from(value)),
                    "APPENDLIMIT" => StatusItem::AppendLimit(value),
                    _ => continue,
                };
                items.push(item);
            }
            _ => continue,
        }
    }

    Ok((Mailbox::new(mailbox_name), items))
}

/// Parses a NAMESPACE response (RFC 2342): three parenthesized lists (or
/// NIL) of `(prefix delimiter)` pairs, for personal, other-users, and
/// shared namespaces respectively.
pub fn parse_namespace_response(lexer: &mut Lexer<'_>) -> Result<Namespaces> {
    lexer.expect_space()?;
    let personal = parse_namespace_group(lexer)?;
    lexer.expect_space()?;
    let other_users = parse_namespace_group(lexer)?;
    lexer.expect_space()?;
    let shared = parse_namespace_group(lexer)?;

    Ok(Namespaces {
        personal,
        other_users,
        shared,
    })
}

fn parse_namespace_group(lexer: &mut Lexer<'_>) -> Result<Vec<NamespaceDescriptor>> {
    if lexer.peek() != Some(b'(') {
        // NIL: this namespace category doesn't exist for this server/user.
        lexer.expect(Token::Nil)?;
        return Ok(Vec::new());
    }

    lexer.expect(Token::LParen)?;
    let mut descriptors = Vec::new();

    loop {
        match lexer.next_token()? {
            Token::RParen => break,
            Token::Space => continue,
            Token::LParen => {
                let prefix = match lexer.next_token()? {
                    Token::QuotedString(s) => s,
                    Token::Literal(bytes) => String::from_utf8_lossy(&bytes).to_string(),
                    token => {
                        return Err(Error::parse_at(
                            lexer.position(),
                            format!("expected namespace prefix, got {token:?}"),
                        ));
                    }
                };
                lexer.expect_space()?;
                let delimiter = match lexer.next_token()? {
                    Token::Nil => None,
                    Token::QuotedString(s) => s.chars().next(),
                    token => {
                        return Err(Error::parse_at(
                            lexer.position(),
                            format!("expected namespace delimiter, got {token:?}"),
                        ));
                    }
                };

                let mut extensions = Vec::new();
                loop {
                    match lexer.next_token()? {
                        Token::RParen => break,
                        Token::Space => continue,
                        Token::QuotedString(name) => {
                            lexer.expect_space()?;
                            let values = read_bracket_atoms(lexer)?;
                            extensions.push((name, values));
                        }
                        _ => continue,
                    }
                }

                descriptors.push(NamespaceDescriptor {
                    prefix,
                    delimiter,
                    extensions,
                });
            }
            token => {
                return Err(Error::parse_at(
                    lexer.position(),
                    format!("unexpected token in NAMESPACE group: {token:?}"),
                ));
            }
        }
    }

    Ok(descriptors)
}

/// Reads text until CRLF.
pub fn read_text_until_crlf(lexer: &mut Lexer<'_>) -> String {
    let remaining = lexer.remaining();

    // Find CRLF
    let end = remaining
        .windows(2)
        .position(|w| w == b"\r\n")
        .unwrap_or(remaining.len());

    lexer.skip(end);

    // Skip CRLF if present
    if lexer.peek() == Some(b'\r') {
        lexer.skip(2);
    }

    String::from_utf8_lossy(&remaining[..end]).to_string()
}
