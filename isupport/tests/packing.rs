use isupport::consts::{MAX_LINE_TOKENS_LEN, MAX_TOKENS_PER_LINE, TRAILER};
use isupport::{OverflowPolicy, PackLimits, ReplyCache, ReplyCacheBuilder, TokenRegistry};

fn build(registry: &TokenRegistry) -> ReplyCache {
    ReplyCacheBuilder::default().build(registry)
}

fn build_dropping(registry: &TokenRegistry) -> ReplyCache {
    let limits = PackLimits::default().with_overflow(OverflowPolicy::Drop);
    ReplyCacheBuilder::new(limits).build(registry)
}

fn assert_line_limits(cache: &ReplyCache) {
    for batch in cache {
        assert!(batch.tokens().len() <= MAX_TOKENS_PER_LINE);
        assert!(batch.tokens_len() <= MAX_LINE_TOKENS_LEN);
        let params: Vec<&str> = batch.params().collect();
        assert_eq!(params.last(), Some(&TRAILER));
        assert_eq!(params.iter().filter(|p| **p == TRAILER).count(), 1);
    }
}

/// Registry with token lengths cycling through awkward sizes.
fn mixed_registry(count: usize) -> TokenRegistry {
    let mut registry = TokenRegistry::new();
    for i in 0..count {
        let name = format!("TOK{i}");
        match i % 5 {
            0 => registry.add_no_value(name),
            1 => registry.add(name, "v"),
            2 => registry.add(name, "x".repeat(37)),
            3 => registry.add(name, "y".repeat(120)),
            _ => {
                let pad = 395 - name.len();
                registry.add(name, "z".repeat(pad));
            }
        }
    }
    registry
}

#[test]
fn two_tokens_one_line() {
    let mut registry = TokenRegistry::new();
    registry.add("A", "1");
    registry.add_no_value("B");
    let cache = build(&registry);
    assert_eq!(cache.len(), 1);
    let params: Vec<&str> = cache.batches()[0].params().collect();
    assert_eq!(params, ["A=1", "B", TRAILER]);
}

#[test]
fn empty_registry_empty_cache() {
    assert!(build(&TokenRegistry::new()).is_empty());
    assert!(build_dropping(&TokenRegistry::new()).is_empty());
}

#[test]
fn thirteen_small_tokens_fill_one_line() {
    let mut registry = TokenRegistry::new();
    for i in 0..13 {
        registry.add(format!("T{i}"), "v");
    }
    for cache in [build(&registry), build_dropping(&registry)] {
        assert_eq!(cache.len(), 1);
        let params: Vec<&str> = cache.batches()[0].params().collect();
        assert_eq!(params.len(), 14);
        assert_eq!(params[0], "T0=v");
        assert_eq!(params[12], "T12=v");
        assert_eq!(params[13], TRAILER);
    }
}

#[test]
fn fourteenth_token_starts_new_line() {
    let mut registry = TokenRegistry::new();
    for i in 0..14 {
        registry.add(format!("T{i}"), "v");
    }
    for cache in [build(&registry), build_dropping(&registry)] {
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.batches()[0].tokens().len(), 13);
        assert_eq!(cache.batches()[1].tokens(), ["T13=v"]);
    }
}

#[test]
fn oversized_token_never_appears() {
    let mut registry = TokenRegistry::new();
    registry.add("HUGE", "x".repeat(MAX_LINE_TOKENS_LEN));
    assert!(build(&registry).is_empty());
    assert!(build_dropping(&registry).is_empty());

    registry.add("NICKLEN", "32");
    for cache in [build(&registry), build_dropping(&registry)] {
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.batches()[0].tokens(), ["NICKLEN=32"]);
    }
}

#[test]
fn token_exactly_at_budget_fits() {
    let mut registry = TokenRegistry::new();
    registry.add("A", "x".repeat(MAX_LINE_TOKENS_LEN - 2));
    registry.add_no_value("B");
    let cache = build(&registry);
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.batches()[0].tokens_len(), MAX_LINE_TOKENS_LEN);
    assert_eq!(cache.batches()[1].tokens(), ["B"]);
}

#[test]
fn line_limits_hold_for_mixed_sizes() {
    for count in [1, 7, 13, 26, 40, 101] {
        let registry = mixed_registry(count);
        assert_line_limits(&build(&registry));
        assert_line_limits(&build_dropping(&registry));
    }
}

#[test]
fn line_limits_hold_for_near_budget_tails() {
    // Shrinking tokens leave a 398 byte line open; a 2 byte token would make it 401.
    let mut registry = TokenRegistry::new();
    let widths = [
        ('a', 199),
        ('b', 99),
        ('c', 49),
        ('d', 24),
        ('e', 12),
        ('f', 5),
        ('g', 2),
        ('h', 1),
    ];
    for (c, n) in widths {
        registry.add_no_value(c.to_string().repeat(n));
    }
    registry.add_no_value("ii");
    let cache = build_dropping(&registry);
    assert_line_limits(&cache);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.batches()[0].tokens().len(), 8);
    assert_eq!(cache.batches()[0].tokens_len(), 398);
}

#[test]
fn wrap_keeps_every_fitting_token() {
    let registry = mixed_registry(40);
    let cache = build(&registry);
    let packed: usize = cache.iter().map(|b| b.tokens().len()).sum();
    // Every fifth token is 395 bytes long and fits on its own.
    assert_eq!(packed, 40);
}

#[test]
fn drop_policy_loses_tokens_wrap_keeps() {
    let mut registry = TokenRegistry::new();
    registry.add_no_value("a".repeat(100));
    registry.add_no_value("b".repeat(350));
    registry.add_no_value("c");

    let dropped = build_dropping(&registry);
    let tokens: Vec<&String> = dropped.iter().flat_map(|b| b.tokens()).collect();
    assert_eq!(tokens, [&"a".repeat(100), &"c".to_owned()]);

    let wrapped = build(&registry);
    let tokens: Vec<&String> = wrapped.iter().flat_map(|b| b.tokens()).collect();
    assert_eq!(tokens.len(), 3);
    assert_eq!(wrapped.len(), 2);
}

#[test]
fn regeneration_is_deterministic() {
    let registry = mixed_registry(60);
    let builder = ReplyCacheBuilder::default();
    assert_eq!(builder.build(&registry), builder.build(&registry));
}

#[test]
fn order_follows_registration() {
    let mut registry = TokenRegistry::new();
    for name in ["Z", "M", "A", "Q"] {
        registry.add_no_value(name);
    }
    let cache = build(&registry);
    assert_eq!(cache.batches()[0].tokens(), ["Z", "M", "A", "Q"]);
}

#[test]
fn custom_limits() {
    let mut registry = TokenRegistry::new();
    for i in 0..10 {
        registry.add(format!("T{i}"), "v");
    }
    let limits = PackLimits::default().with_max_tokens(4);
    let cache = ReplyCacheBuilder::new(limits).build(&registry);
    let sizes: Vec<usize> = cache.iter().map(|b| b.tokens().len()).collect();
    assert_eq!(sizes, [4, 4, 2]);
}
