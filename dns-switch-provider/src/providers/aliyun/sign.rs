//! 阿里云 RPC 签名 (HMAC-SHA1, `SignatureVersion` 1.0)
//!
//! 参考: <https://help.aliyun.com/zh/sdk/product-overview/rpc-mechanism>

use std::collections::BTreeMap;
use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;

use crate::providers::common::hmac_sha1;
use crate::utils::log_sanitizer::mask_identifier;

use super::ALIYUN_DNS_VERSION;

/// 签名算法
pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
/// 签名算法版本
pub const SIGNATURE_VERSION: &str = "1.0";
/// 响应格式
pub const RESPONSE_FORMAT: &str = "JSON";

const SIGNATURE_KEY: &str = "Signature";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Signs RPC-style Alidns requests with an access key pair.
///
/// ```rust
/// use std::collections::BTreeMap;
/// use dns_switch_provider::AliyunSigner;
///
/// let signer = AliyunSigner::new("testid", "testsecret");
/// let mut params = BTreeMap::new();
/// params.insert("Action".to_string(), "DescribeDomainRecordInfo".to_string());
/// params.insert("RecordId".to_string(), "750504892456594432".to_string());
///
/// let signed = signer.sign_with(params, "2024-01-15T08:00:00Z", "3ee8c1b8-83d3-44af-a94f-4e0ad82fd6cf");
/// assert_eq!(signed.signature(), "tYXUY37KTLXjY04UOcpKSYyljuw=");
/// ```
#[derive(Clone)]
pub struct AliyunSigner {
    access_key_id: String,
    access_key_secret: String,
}

impl fmt::Debug for AliyunSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliyunSigner")
            .field("access_key_id", &mask_identifier(&self.access_key_id))
            .field("access_key_secret", &"***")
            .finish()
    }
}

impl AliyunSigner {
    /// Creates a signer for the given access key pair.
    pub fn new(access_key_id: impl Into<String>, access_key_secret: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            access_key_secret: access_key_secret.into(),
        }
    }

    /// The access key id placed in every signed request.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Signs `params` with the current UTC time and a fresh UUID v4 nonce.
    pub fn sign(&self, params: BTreeMap<String, String>) -> SignedRequest {
        let timestamp = Utc::now().format(TIMESTAMP_FORMAT).to_string();
        let nonce = uuid::Uuid::new_v4().to_string();
        self.sign_with(params, &timestamp, &nonce)
    }

    /// Signs `params` with a caller-supplied timestamp and nonce.
    ///
    /// Same inputs always yield the same signature.
    pub fn sign_with(
        &self,
        mut params: BTreeMap<String, String>,
        timestamp: &str,
        nonce: &str,
    ) -> SignedRequest {
        params.remove(SIGNATURE_KEY);

        params.insert("Format".to_string(), RESPONSE_FORMAT.to_string());
        params.insert("Version".to_string(), ALIYUN_DNS_VERSION.to_string());
        params.insert("AccessKeyId".to_string(), self.access_key_id.clone());
        params.insert("SignatureMethod".to_string(), SIGNATURE_METHOD.to_string());
        params.insert("SignatureVersion".to_string(), SIGNATURE_VERSION.to_string());
        params.insert("Timestamp".to_string(), timestamp.to_string());
        params.insert("SignatureNonce".to_string(), nonce.to_string());

        let canonical = canonical_query_string(&params);
        let string_to_sign = string_to_sign(&canonical);
        log::debug!("StringToSign: {string_to_sign}");

        let signature = compute_signature(&self.access_key_secret, &string_to_sign);
        params.insert(SIGNATURE_KEY.to_string(), signature);

        SignedRequest { params }
    }
}

/// A fully signed parameter set, ready to be sent as a query string.
///
/// Single-use: the nonce inside it must not be replayed.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    params: BTreeMap<String, String>,
}

impl SignedRequest {
    /// All parameters, `Signature` included.
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// The base64 signature value.
    pub fn signature(&self) -> &str {
        self.params
            .get(SIGNATURE_KEY)
            .map_or("", String::as_str)
    }

    /// The signing input: every parameter except `Signature`, sorted and encoded.
    pub fn canonical_query_string(&self) -> String {
        canonical_query_string(&self.params)
    }

    /// Transport-ready query string, `Signature` included and encoded.
    pub fn query_string(&self) -> String {
        encode_pairs(self.params.iter())
    }
}

/// RFC 3986 percent-encoding as required by the RPC signature.
///
/// Unreserved characters (`A-Z a-z 0-9 - _ . ~`) stay literal; everything else
/// becomes `%XX` with uppercase hex, so a space is `%20`, never `+`.
pub fn percent_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Sorted (byte-wise by key), encoded `k=v` pairs joined by `&`, `Signature` excluded.
pub fn canonical_query_string(params: &BTreeMap<String, String>) -> String {
    encode_pairs(params.iter().filter(|(k, _)| k.as_str() != SIGNATURE_KEY))
}

/// `GET&%2F&` followed by the encoded canonical query string.
pub fn string_to_sign(canonical_query_string: &str) -> String {
    format!(
        "GET&{}&{}",
        percent_encode("/"),
        percent_encode(canonical_query_string)
    )
}

/// Base64 of HMAC-SHA1 over `string_to_sign`, keyed with `secret + "&"`.
pub fn compute_signature(access_key_secret: &str, string_to_sign: &str) -> String {
    let key = format!("{access_key_secret}&");
    STANDARD.encode(hmac_sha1(key.as_bytes(), string_to_sign.as_bytes()))
}

fn encode_pairs<'a>(pairs: impl Iterator<Item = (&'a String, &'a String)>) -> String {
    pairs
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
