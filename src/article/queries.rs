/// 게시글 조회
pub const GET_ARTICLE: &str = r#"
    SELECT art_id, art_name, art_description, art_price, art_min_bidding,
           art_auction_start, art_auction_end, m_id, c_id
    FROM article
    WHERE art_id = $1
"#;

/// 모든 게시글 조회
pub const GET_ALL_ARTICLES: &str = r#"
    SELECT art_id, art_name, art_description, art_price, art_min_bidding,
           art_auction_start, art_auction_end, m_id, c_id
    FROM article
    ORDER BY art_id
"#;

/// 게시글 이미지 조회 (등록 순서)
pub const GET_ARTICLE_IMAGES: &str =
    "SELECT img_path FROM article_image WHERE art_id = $1 ORDER BY img_id";

/// 영화 등록 (이미 있으면 무시)
pub const INSERT_MOVIE: &str =
    "INSERT INTO movie (m_id, m_title) VALUES ($1, $2) ON CONFLICT (m_id) DO NOTHING";

/// 게시글 등록
pub const INSERT_ARTICLE: &str = r#"
    INSERT INTO article (art_name, art_description, art_price, art_min_bidding,
                         art_auction_start, art_auction_end, m_id, c_id)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
    RETURNING art_id, art_name, art_description, art_price, art_min_bidding,
              art_auction_start, art_auction_end, m_id, c_id
"#;

/// 게시글 이미지 등록
pub const INSERT_ARTICLE_IMAGE: &str =
    "INSERT INTO article_image (art_id, img_path) VALUES ($1, $2)";

/// 전문 검색 + 유사도 검색
/// 이름, 설명, 영화 제목 순으로 순위를 매기고 매칭되지 않은 순위는 마지막
/// 유사도는 컬럼별로 계산해 가장 높은 값을 쓴다.
pub const SEARCH_ARTICLES: &str = r#"
    SELECT a.art_id, a.art_name, a.art_description, a.art_price, a.art_min_bidding,
           a.art_auction_start, a.art_auction_end, a.m_id, a.c_id
    FROM article a
    JOIN movie m ON m.m_id = a.m_id
    CROSS JOIN plainto_tsquery($1) AS q
    WHERE to_tsvector(a.art_name) @@ q
       OR to_tsvector(a.art_description) @@ q
       OR to_tsvector(m.m_title) @@ q
       OR GREATEST(similarity(a.art_name, $1),
                   similarity(a.art_description, $1),
                   similarity(m.m_title, $1)) > 0.08
    ORDER BY
        CASE WHEN to_tsvector(a.art_name) @@ q
             THEN ts_rank(to_tsvector(a.art_name), q) END DESC NULLS LAST,
        CASE WHEN to_tsvector(a.art_description) @@ q
             THEN ts_rank(to_tsvector(a.art_description), q) END DESC NULLS LAST,
        CASE WHEN to_tsvector(m.m_title) @@ q
             THEN ts_rank(to_tsvector(m.m_title), q) END DESC NULLS LAST,
        GREATEST(similarity(a.art_name, $1),
                 similarity(a.art_description, $1),
                 similarity(m.m_title, $1)) DESC
    LIMIT $2 OFFSET $3
"#;

/// 입찰 수 많은 순 게시글 조회
pub const GET_MOST_BIDS: &str = r#"
    SELECT a.art_id, a.art_name, a.art_description, a.art_price, a.art_min_bidding,
           a.art_auction_start, a.art_auction_end, a.m_id, a.c_id
    FROM article a
    LEFT JOIN bid b ON b.art_id = a.art_id
    GROUP BY a.art_id
    ORDER BY COUNT(b.bid_id) DESC, a.art_id
    LIMIT $1 OFFSET $2
"#;

/// 관심 등록 여부
pub const IS_LIKED_BY: &str =
    "SELECT EXISTS (SELECT 1 FROM interests WHERE art_id = $1 AND b_id = $2)";

/// 게시글 삭제
pub const DELETE_ARTICLE: &str = "DELETE FROM article WHERE art_id = $1";

/// 게시글 이미지 삭제
pub const DELETE_ARTICLE_IMAGES: &str = "DELETE FROM article_image WHERE art_id = $1";
