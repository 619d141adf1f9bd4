//! 多行文本格式码剥离
//!
//! MText的原始值里混有内联格式控制码（字体、字高、对齐、堆叠等），
//! 显示前需要剥离，只保留纯文本。规则：
//! - `\P` 映射为换行
//! - `{...}` 分组递归处理后折叠为最后一个分号之后的文本
//! - 带参数的反斜杠码（`\f` `\H` `\W` 等）连同参数一起吞掉直到分号
//! - 其余反斜杠码丢弃单个控制字符

use std::iter::Peekable;
use std::str::Chars;

/// 剥离MText内联格式控制码，返回纯显示文本
pub fn strip_inline_codes(value: &str) -> String {
    let mut chars = value.chars().peekable();
    strip_group(&mut chars)
}

/// 处理一个分组（或顶层）直到匹配的 `}` 或输入结束
fn strip_group(chars: &mut Peekable<Chars>) -> String {
    let mut out = String::new();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                let inner = strip_group(chars);
                match inner.rfind(';') {
                    Some(pos) => out.push_str(&inner[pos + 1..]),
                    None => out.push_str(&inner),
                }
            }
            '}' => break,
            '\\' => match chars.next() {
                Some('P') => out.push('\n'),
                Some('~') => out.push(' '),
                Some('\\') => out.push('\\'),
                Some('{') => out.push('{'),
                Some('}') => out.push('}'),
                Some(code) if takes_argument(code) => {
                    // 吞掉参数直到分号；分组结束符不吞
                    while let Some(&next) = chars.peek() {
                        if next == ';' {
                            chars.next();
                            break;
                        }
                        if next == '}' {
                            break;
                        }
                        chars.next();
                    }
                }
                Some(_) | None => {}
            },
            _ => out.push(c),
        }
    }

    out
}

/// 该控制码是否带参数（参数以分号结尾）
fn takes_argument(code: char) -> bool {
    matches!(
        code,
        'f' | 'F' | 'H' | 'W' | 'Q' | 'A' | 'C' | 'T' | 'S' | 'p'
    )
}
