//! 固定容量バッファ実装
//!
//! 全コマンドが共有する単一のテキスト格納領域。容量は構築時に一度だけ
//! 決まり、溢れた入力は黙って切り捨てる

/// デフォルトの最大容量（バイト単位）
pub const DEFAULT_CAPACITY: usize = 256;

/// 固定容量バッファ構造体
///
/// 有効なデータは `[0, len)` の範囲のみ。シングルバイト文字の列として
/// 扱い、表示時にのみUTF-8として解釈する
#[derive(Debug, Clone)]
pub struct FixedBuffer {
    /// 内部格納領域（常に `len <= capacity` を満たす）
    bytes: Vec<u8>,
    /// 最大容量
    capacity: usize,
}

impl FixedBuffer {
    /// デフォルト容量で新しいバッファを作成
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// 指定容量で新しいバッファを作成
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// 現在の長さ
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// 最大容量
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 残り空き容量
    pub fn remaining(&self) -> usize {
        self.capacity - self.bytes.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// 末尾への追記
    ///
    /// 空き容量に収まる先頭部分だけを書き込み、実際に書き込んだ
    /// バイト数を返す（切り捨て方針）
    pub fn append(&mut self, text: &[u8]) -> usize {
        let written = text.len().min(self.remaining());
        self.bytes.extend_from_slice(&text[..written]);
        written
    }

    /// 先頭からの削除
    ///
    /// 先頭 `min(n, len)` バイトを取り除き、残りを前方へ詰める。
    /// 実際に取り除いたバイト数を返す
    pub fn drop_front(&mut self, n: usize) -> usize {
        let removed = n.min(self.bytes.len());
        self.bytes.drain(..removed);
        removed
    }

    /// 末尾からの削除（直近の追記の取り消し用）
    pub fn truncate_back(&mut self, n: usize) {
        let new_len = self.bytes.len().saturating_sub(n);
        self.bytes.truncate(new_len);
    }

    /// 全消去
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// 内容のバイト列ビュー
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 出力チャネル向けの表示用文字列
    pub fn to_display_string(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl Default for FixedBuffer {
    fn default() -> Self {
        Self::new()
    }
}
