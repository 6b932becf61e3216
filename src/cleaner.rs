use std::collections::HashSet;
use std::sync::OnceLock;

use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::models::CleanResult;

/// Query parameter names that get stripped from every URL.
///
/// The list is flat: a parameter is removed if and only if its lowercased
/// name appears here, regardless of value or of which service the URL
/// belongs to. The provenance groups below are informational only.
///
/// Every entry must be lowercase: membership tests lowercase the candidate
/// name first, so a mixed-case entry could never match.
static TRACKING_PARAMS: &[&str] = &[
    // UTM and general analytics
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "_ga",
    "_gl",
    "_gid",
    "gclid",
    "dclid",
    "msclkid",
    "yclid",
    // Facebook / Meta
    "fbclid",
    "fb_action_ids",
    "fb_action_types",
    "fb_source",
    "action_object_map",
    "action_type_map",
    "action_ref_map",
    "fb_ref",
    "fb_sig",
    "fref",
    // Twitter/X, TikTok, Instagram
    "twclid",
    "ttclid",
    "igshid",
    "ig_cache_key",
    "ig_rid",
    "ig_mid",
    "xid",
    "s",
    "t",
    "si",
    "st",
    "smid",
    // LinkedIn
    "li_fat_id",
    // Microsoft Ads / Yahoo / Bing
    "ocid",
    "bclid",
    "rb_clickid",
    // Marketing platforms
    "mc_cid",
    "mc_eid",
    "_hsenc",
    "_hsmi",
    "mkt_tok",
    "elqtrackid",
    "elqtrack",
    "trk_contact",
    "trk_msg",
    "trk_module",
    "trk_sid",
    // Piwik / Matomo
    "pk_campaign",
    "pk_kwd",
    "pk_source",
    "pk_medium",
    "pk_content",
    "pk_cpm",
    // Affiliate and ad networks
    "clickid",
    "adid",
    "adgroupid",
    "campaignid",
    "creative",
    "matchtype",
    "network",
    "placement",
    "device",
    "keyword",
    "adposition",
    "s_kwcid",
    "aff_id",
    "aff_sub",
    "aff_sub2",
    "aff_sub3",
    "aff_sub4",
    "aff_sub5",
    "affiliate_id",
    "utm_affiliate",
    "irgwc",
    "irclickid",
    "irsid",
    "tag",
    "ascsubtag",
    "cjevent",
    "impactclkid",
    "cmpid",
    "mkwid",
    "mktid",
    "mkcid",
    "mktsrc",
    "mkevt",
    "mkrid",
    "u1",
    "u2",
    "u3",
    "u4",
    "u5",
    // AMP / redirect / click layers
    "amp",
    "amp_js_v",
    "amp_gsa",
    "amp_r",
    "amp_lite",
    "ampcachebust",
    "ampcid",
    "redirect",
    "redirect_uri",
    "redirect_log_mongo_id",
    "redirect_mongo_id",
    "ref",
    "ref_src",
    "ref_url",
    "source",
    "src",
    "from",
    "via",
    "r",
    "rtd",
    "original_referer",
    // Messaging / deep link / share clutter
    "is_copy_url",
    "entry_point",
    "share_id",
    "share_token",
    "share_link_id",
    "sender_device",
    "sender_web_id",
    "session_id",
    "session_key",
    "click_time",
    "shortlink",
    "deep_link_id",
    "app_id",
    // Storefront / content platforms
    "vercelanalytics",
    "page",
    "position",
    "feeditemid",
    // Newsletter / personalization trackers
    "vero_conv",
    "vero_id",
    "ga_source",
    "ga_medium",
    "ga_term",
    "ga_content",
    "ga_campaign",
    "sc_campaign",
    "sc_channel",
    "sc_content",
    "sc_medium",
    "sc_outcome",
    "sc_geo",
    "sc_country",
    "sc_device",
    // Navigation noise
    "usp",
    "dti",
    "ns_mchannel",
    "ns_source",
    "ns_campaign",
    "ns_linkname",
    "ns_fee",
    "ei",
    "ved",
    "ct",
    "icid",
    "hash",
];

fn tracking_params() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| TRACKING_PARAMS.iter().copied().collect())
}

/// Whether a query parameter name, compared case-insensitively, is on the
/// denylist.
pub fn is_tracking_param(name: &str) -> bool {
    tracking_params().contains(name.to_lowercase().as_str())
}

/// The input could not be parsed as a URL. The parser is the sole arbiter
/// of validity; there is no fallback string surgery on rejected input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("not a valid URL")]
    InvalidFormat,
}

/// Removes denylisted query parameters from `raw` and reports what changed.
///
/// Retained parameters keep their original relative order, repeated names
/// are treated as independent entries, and a query left empty by filtering
/// is dropped entirely rather than rendered as a trailing `?`. The output
/// is stable: cleaning an already-cleaned URL removes nothing and returns
/// the same string.
pub fn clean(raw: &str) -> Result<CleanResult, ParseError> {
    let mut url = Url::parse(raw).map_err(|_| ParseError::InvalidFormat)?;

    let mut removed = 0usize;

    if url.query().is_some() {
        let query_pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        let mut new_query = url::form_urlencoded::Serializer::new(String::new());
        let mut any_kept = false;

        for (key, value) in &query_pairs {
            if is_tracking_param(key) {
                removed += 1;
            } else {
                new_query.append_pair(key, value);
                any_kept = true;
            }
        }

        if removed > 0 {
            if any_kept {
                url.set_query(Some(&new_query.finish()));
            } else {
                url.set_query(None);
            }
        } else if !any_kept {
            // A bare `?` carries no parameters at all.
            url.set_query(None);
        }
    }

    let cleaned = url.to_string();
    debug!(original = %raw, cleaned = %cleaned, removed, "cleaned URL");

    Ok(CleanResult {
        original: raw.to_string(),
        cleaned,
        removed_count: removed,
    })
}
